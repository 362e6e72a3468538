use usb_device::{
    class_prelude::{UsbBus, UsbBusAllocator},
    device::{StringDescriptors, UsbDevice, UsbDeviceBuilder, UsbDeviceState, UsbVidPid},
    prelude::BuilderError,
    LangID, UsbError,
};
use usbd_hid::{
    descriptor::{KeyboardReport, SerializedDescriptor},
    hid_class::HIDClass,
};

use crate::keyboard::{ExternalCommunicator, HostLeds, Key};

use super::DeviceInfo;

pub struct UsbCommunicator<'a, B: UsbBus> {
    usb_device: UsbDevice<'a, B>,
    keyboard_usb_hid: HIDClass<'a, B>,
    host_leds: HostLeds,
}

impl<'a, B: UsbBus> UsbCommunicator<'a, B> {
    const NUM_ROLLOVER: usize = 6;

    pub fn new(
        device_info: DeviceInfo,
        usb_bus_alloc: &'a UsbBusAllocator<B>,
    ) -> Result<UsbCommunicator<'a, B>, BuilderError> {
        let keyboard_usb_hid = HIDClass::new(usb_bus_alloc, KeyboardReport::desc(), 10);
        let descriptors = StringDescriptors::new(LangID::EN_US)
            .manufacturer(device_info.manufacturer)
            .serial_number(device_info.serial_number)
            .product(device_info.product_name);
        let usb_device = UsbDeviceBuilder::new(
            usb_bus_alloc,
            UsbVidPid(device_info.vendor_id, device_info.product_id),
        )
        .strings(&[descriptors])?
        .device_class(0)
        .build();

        Ok(UsbCommunicator {
            usb_device,
            keyboard_usb_hid,
            host_leds: HostLeds::default(),
        })
    }

    /// Services the bus and picks up LED output reports from the host.
    pub fn poll(&mut self) {
        if !self.usb_device.poll(&mut [&mut self.keyboard_usb_hid]) {
            return;
        }
        let mut buf = [0u8; 1];
        match self.keyboard_usb_hid.pull_raw_output(&mut buf) {
            Ok(1) => {
                self.host_leds = HostLeds::from(buf[0]);
                crate::debug!("Host LEDs: {:?}", self.host_leds);
            }
            Ok(_) | Err(UsbError::WouldBlock) => {}
            Err(e) => crate::warn!("Failed to read LED report: {:?}", e),
        }
    }

    pub fn state(&self) -> UsbDeviceState {
        self.usb_device.state()
    }
}

impl<'a, B: UsbBus> ExternalCommunicator for UsbCommunicator<'a, B> {
    type Error = UsbError;

    fn is_ready(&self) -> bool {
        self.usb_device.state() == UsbDeviceState::Configured
    }

    fn send_keys(&self, keys: &[Key]) -> Result<(), UsbError> {
        let keyboard_report = keyboard_report(keys, Self::NUM_ROLLOVER);
        self.keyboard_usb_hid.push_input(&keyboard_report)?;
        Ok(())
    }

    fn host_leds(&self) -> HostLeds {
        self.host_leds
    }
}

fn keyboard_report(keys: &[Key], rollover: usize) -> KeyboardReport {
    let mut report = KeyboardReport {
        modifier: 0,
        reserved: 0,
        leds: 0,
        keycodes: [0; 6],
    };
    report.modifier = keys
        .iter()
        .map(|key| key.modifier_key_flag())
        .fold(0x00_u8, |acc, flg| acc | flg);
    keys.iter()
        .filter_map(|key| key.key_code())
        .take(rollover)
        .enumerate()
        .for_each(|(i, c)| report.keycodes[i] = c);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_merges_modifiers_and_codes() {
        let report = keyboard_report(&[Key::LeftShift, Key::Ctrl_C, Key::A], 6);
        assert_eq!(report.modifier, 0b0000_0011);
        assert_eq!(report.keycodes, [0x06, 0x04, 0, 0, 0, 0]);
    }

    #[test]
    fn report_is_limited_to_rollover() {
        let keys = [Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G];
        let report = keyboard_report(&keys, 6);
        assert_eq!(report.keycodes, [0x04, 0x05, 0x06, 0x07, 0x08, 0x09]);
    }

    #[test]
    fn empty_report_releases_everything() {
        let report = keyboard_report(&[], 6);
        assert_eq!(report.modifier, 0);
        assert_eq!(report.keycodes, [0; 6]);
    }
}
