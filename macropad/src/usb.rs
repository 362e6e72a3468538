mod device_info;
mod usb_communicator;

pub use device_info::DeviceInfo;
pub use usb_communicator::UsbCommunicator;
