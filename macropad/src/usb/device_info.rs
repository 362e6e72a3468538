/// Strings and IDs the pad reports in its USB device descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    pub manufacturer: &'static str,
    pub vendor_id: u16,
    pub product_id: u16,
    pub product_name: &'static str,
    /// Also used as the serial number string descriptor.
    pub serial_number: &'static str,
}
