//! Link bring-up before the control loop starts.
//!
//! ```text
//! beep ─▶ connect(peer, pin) ─▶ poll is_connected every 10 ms ─▶ beep ─▶ LinkUp
//! ```
//!
//! There is no timeout: the remote is useless without the robot, so it
//! waits for as long as it takes.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::{CONNECT_TONE_HZ, CONNECT_TONE_MS, LINK_POLL_MS, RemoteConfig};
use crate::error::{Error, LinkError};
use crate::protocol::Link;

use super::events::AppEvent;
use super::ports::{EventSink, FeedbackPort};

/// Pair with the configured robot and block until the link is up.
///
/// Returns the number of polls it took for the link to come up.
pub fn establish_link<L>(
    config: &RemoteConfig,
    link: &mut L,
    feedback: &mut impl FeedbackPort,
    delay: &mut impl DelayNs,
    sink: &mut impl EventSink,
) -> Result<u32, Error>
where
    L: Link,
    L::Error: Into<LinkError>,
{
    feedback.tone(CONNECT_TONE_HZ, CONNECT_TONE_MS);

    info!("Pairing with {}", config.robot_address);
    sink.emit(&AppEvent::LinkPairing(config.robot_address));
    link.connect(&config.robot_address, config.pin.as_str())
        .map_err(|e| {
            let e: LinkError = e.into();
            warn!("Pairing request failed: {}", e);
            Error::Link(e)
        })?;

    let mut polls: u32 = 0;
    while !link.is_connected() {
        delay.delay_ms(LINK_POLL_MS);
        polls = polls.saturating_add(1);
    }

    feedback.tone(CONNECT_TONE_HZ, CONNECT_TONE_MS);
    info!("connected");
    sink.emit(&AppEvent::LinkUp);
    Ok(polls)
}
