//! HC-05 Bluetooth SPP link adapter.
//!
//! The HC-05 sits on a UART. In command mode it takes `AT` commands
//! terminated by CRLF and answers each with `OK` or `ERROR:(n)`, possibly
//! preceded by informational lines (`+ROLE:1`). Once linked it becomes a
//! transparent serial pipe and raises its STATE pin.
//!
//! [`Hc05Link::connect`] configures the module as master, sets the PIN,
//! binds the robot's address and links to it:
//!
//! ```text
//! AT ─▶ AT+ROLE=1 ─▶ AT+CMODE=0 ─▶ AT+PSWD=<pin> ─▶ AT+BIND=<addr> ─▶ AT+LINK=<addr>
//! ```
//!
//! Addresses use the module's `NAP,UAP,LAP` form: `cc:78:ab:54:d7:d0`
//! becomes `cc78,ab,54d7d0`.

use core::fmt::Write as _;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use log::{debug, info, warn};

use crate::config::BdAddr;
use crate::error::LinkError;
use crate::protocol::Link;

/// Reply timeout for configuration commands.
pub const AT_TIMEOUT_MS: u32 = 1_000;
/// Reply timeout for `AT+LINK`, which waits for the page to complete.
pub const LINK_TIMEOUT_MS: u32 = 10_000;
/// Poll period while waiting for a reply.
const AT_POLL_MS: u32 = 10;
/// Longest reply line accepted.
const MAX_LINE: usize = 64;
/// Reads spent discarding stale input before a command.
const DRAIN_CHUNKS: usize = 8;

/// Byte-level UART access the link needs.
pub trait SerialPort {
    type Error: core::fmt::Debug;

    /// Queue `data` for transmission. Returns the number of bytes accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Read whatever is pending into `buf` without blocking. `Ok(0)` when
    /// nothing has arrived.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

#[cfg(all(target_os = "espidf", feature = "espidf"))]
impl SerialPort for esp_idf_hal::uart::UartDriver<'_> {
    type Error = esp_idf_sys::EspError;

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        esp_idf_hal::uart::UartDriver::write(self, data)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        esp_idf_hal::uart::UartDriver::read(self, buf, esp_idf_hal::delay::NON_BLOCK)
    }
}

/// HC-05 module on `uart`, with its STATE output on `state`.
pub struct Hc05Link<U, P, D> {
    uart: U,
    state: P,
    delay: D,
}

impl<U, P, D> Hc05Link<U, P, D>
where
    U: SerialPort,
    P: InputPin,
    D: DelayNs,
{
    pub fn new(uart: U, state: P, delay: D) -> Self {
        Self { uart, state, delay }
    }

    /// Give back the UART, STATE pin and delay.
    pub fn release(self) -> (U, P, D) {
        (self.uart, self.state, self.delay)
    }

    /// Send one AT command and wait up to `timeout_ms` for `OK`.
    pub fn command(&mut self, cmd: &str, timeout_ms: u32) -> Result<(), LinkError> {
        self.drain_input()?;
        debug!("HC-05 > {}", cmd);
        self.write_all(cmd.as_bytes())?;
        self.write_all(b"\r\n")?;
        self.await_ok(timeout_ms).inspect_err(|e| warn!("HC-05: {} failed: {}", cmd, e))
    }

    fn write_all(&mut self, mut data: &[u8]) -> Result<usize, LinkError> {
        let total = data.len();
        while !data.is_empty() {
            let n = self.uart.write(data).map_err(|e| {
                warn!("HC-05: UART write failed: {:?}", e);
                LinkError::Io
            })?;
            if n == 0 {
                return Err(LinkError::Io);
            }
            data = &data[n..];
        }
        Ok(total)
    }

    /// Discard anything left over from a previous reply, at most
    /// `DRAIN_CHUNKS` reads' worth.
    fn drain_input(&mut self) -> Result<(), LinkError> {
        let mut chunk = [0u8; 32];
        for _ in 0..DRAIN_CHUNKS {
            if self.read_chunk(&mut chunk)? == 0 {
                break;
            }
        }
        Ok(())
    }

    fn read_chunk(&mut self, chunk: &mut [u8]) -> Result<usize, LinkError> {
        self.uart.read(chunk).map_err(|e| {
            warn!("HC-05: UART read failed: {:?}", e);
            LinkError::Io
        })
    }

    fn await_ok(&mut self, timeout_ms: u32) -> Result<(), LinkError> {
        let mut line: heapless::Vec<u8, MAX_LINE> = heapless::Vec::new();
        let mut chunk = [0u8; 32];
        let mut waited_ms: u32 = 0;

        // Every pass counts toward the timeout, informational lines included.
        loop {
            let n = self.read_chunk(&mut chunk)?;
            for &b in &chunk[..n] {
                match b {
                    b'\n' => {
                        if let Some(verdict) = classify_reply(&line) {
                            return verdict;
                        }
                        line.clear();
                    }
                    b'\r' => {}
                    _ => line.push(b).map_err(|_| LinkError::Overflow)?,
                }
            }

            if waited_ms >= timeout_ms {
                return Err(LinkError::Timeout);
            }
            self.delay.delay_ms(AT_POLL_MS);
            waited_ms = waited_ms.saturating_add(AT_POLL_MS);
        }
    }
}

impl<U, P, D> Link for Hc05Link<U, P, D>
where
    U: SerialPort,
    P: InputPin,
    D: DelayNs,
{
    type Error = LinkError;

    fn connect(&mut self, peer: &BdAddr, pin: &str) -> Result<(), LinkError> {
        let addr = at_address(peer)?;
        info!("HC-05: linking to {} ({})", peer, addr);

        self.command("AT", AT_TIMEOUT_MS)?;
        self.command("AT+ROLE=1", AT_TIMEOUT_MS)?;
        self.command("AT+CMODE=0", AT_TIMEOUT_MS)?;

        let mut cmd: heapless::String<32> = heapless::String::new();
        write!(cmd, "AT+PSWD={}", pin).map_err(|_| LinkError::Overflow)?;
        self.command(&cmd, AT_TIMEOUT_MS)?;

        cmd.clear();
        write!(cmd, "AT+BIND={}", addr).map_err(|_| LinkError::Overflow)?;
        self.command(&cmd, AT_TIMEOUT_MS)?;

        cmd.clear();
        write!(cmd, "AT+LINK={}", addr).map_err(|_| LinkError::Overflow)?;
        self.command(&cmd, LINK_TIMEOUT_MS)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, LinkError> {
        if !self.is_connected() {
            return Err(LinkError::NotConnected);
        }
        self.write_all(data)
    }

    fn is_connected(&mut self) -> bool {
        self.state.is_high().unwrap_or(false)
    }
}

/// `OK` → success, `ERROR…`/`FAIL…` → rejected, anything else is
/// informational.
fn classify_reply(line: &[u8]) -> Option<Result<(), LinkError>> {
    let line = line.trim_ascii();
    if line == b"OK" {
        Some(Ok(()))
    } else if line.starts_with(b"ERROR") || line.starts_with(b"FAIL") {
        Some(Err(LinkError::Rejected))
    } else {
        None
    }
}

/// Render `addr` as the module's `NAP,UAP,LAP` triple.
pub fn at_address(addr: &BdAddr) -> Result<heapless::String<14>, LinkError> {
    let [n0, n1, u, l0, l1, l2] = addr.octets();
    let mut out = heapless::String::new();
    write!(out, "{n0:02x}{n1:02x},{u:02x},{l0:02x}{l1:02x}{l2:02x}").map_err(|_| LinkError::Overflow)?;
    Ok(out)
}
