use super::{HostLeds, Key};

pub trait ExternalCommunicator {
    type Error;
    fn is_ready(&self) -> bool;
    fn send_keys(&self, keys: &[Key]) -> Result<(), Self::Error>;

    /// Lock key state last reported by the host.
    fn host_leds(&self) -> HostLeds {
        HostLeds::default()
    }
}
