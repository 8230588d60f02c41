fn main() {
    println!("cargo:rerun-if-env-changed=REMOTE_CONFIG");

    // Host builds (tests, fuzzing) need no ESP-IDF environment.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
