#![no_std]
#![no_main]

use core::{
    cell::RefCell,
    sync::atomic::{AtomicUsize, Ordering},
};

use cortex_m::interrupt::Mutex;
use defmt_rtt as _;
use direct_pins::DirectPins;
use fugit::{ExtU32, RateExtU32};
use hal::{
    clocks::init_clocks_and_plls,
    entry,
    gpio::{FunctionI2C, Pin, PullUp},
    multicore::{Multicore, Stack},
    pac::{self, interrupt},
    sio::Spinlock0,
    timer::{Alarm, Alarm0},
    usb::UsbBus,
    Sio, Timer, Watchdog, I2C,
};
use macropad::{
    display::KeyboardDisplay,
    keyboard::Controller,
    usb::{DeviceInfo, UsbCommunicator},
};
use macropad8_vim::{status::draw_status, Layout, Status, VimProcessor};
use oled::Ssd1306Display;
use panic_probe as _;
use rp2040_hal as hal;
use ssd1306::{size::DisplaySize128x64, I2CDisplayInterface};
use usb_device::class_prelude::UsbBusAllocator;

mod direct_pins;
mod oled;

#[link_section = ".boot2"]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

const XTAL_FREQ_HZ: u32 = 12_000_000;
const USB_SEND_INTERVAL_MICROS: u32 = 10_000;
const ROLLOVER: usize = 8;
// 1 ms at 125 MHz, also the debounce time
const SCAN_INTERVAL_CYCLES: u32 = 125_000;

type KeyboardType = Controller<
    2,
    ROLLOVER,
    UsbCommunicator<'static, UsbBus>,
    DirectPins<2, 4>,
    Layout,
    VimProcessor,
>;
static mut KEYBOARD: Mutex<RefCell<Option<KeyboardType>>> = Mutex::new(RefCell::new(None));
static mut ALARM: Mutex<RefCell<Option<Alarm0>>> = Mutex::new(RefCell::new(None));
static mut CORE1_STACK: Stack<4096> = Stack::new();

#[entry]
fn main() -> ! {
    // These variables must be static due to lifetime constraints
    static mut USB_BUS: Option<UsbBusAllocator<UsbBus>> = None;

    defmt::info!("Launching ANAVI Macro Pad 8!");

    let mut pac = pac::Peripherals::take().unwrap();
    // The single-cycle I/O block controls our GPIO pins
    let mut sio = Sio::new(pac.SIO);
    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );
    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    // The default is to generate a 125 MHz system clock
    let clocks = init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let mut alarm = timer.alarm_0().unwrap();
    alarm.schedule(USB_SEND_INTERVAL_MICROS.micros()).unwrap();
    alarm.enable_interrupt();
    cortex_m::interrupt::free(|cs| unsafe {
        ALARM.borrow(cs).replace(Some(alarm));
    });

    let usb_bus = UsbBusAllocator::new(UsbBus::new(
        pac.USBCTRL_REGS,
        pac.USBCTRL_DPRAM,
        clocks.usb_clock,
        true,
        &mut pac.RESETS,
    ));
    *USB_BUS = Some(usb_bus);

    let mut mc = Multicore::new(&mut pac.PSM, &mut pac.PPB, &mut sio.fifo);
    let cores = mc.cores();
    let core1 = &mut cores[1];

    let sda: Pin<_, FunctionI2C, PullUp> = pins.gpio14.reconfigure();
    let scl: Pin<_, FunctionI2C, PullUp> = pins.gpio15.reconfigure();
    let i2c = I2C::i2c1(
        pac.I2C1,
        sda,
        scl,
        400.kHz(),
        &mut pac.RESETS,
        &clocks.system_clock,
    );
    let mut display = Ssd1306Display::new(I2CDisplayInterface::new(i2c), DisplaySize128x64);

    let switches = DirectPins::new([
        [
            pins.gpio2.into_pull_up_input().into_dyn_pin(),
            pins.gpio3.into_pull_up_input().into_dyn_pin(),
            pins.gpio4.into_pull_up_input().into_dyn_pin(),
            pins.gpio5.into_pull_up_input().into_dyn_pin(),
        ],
        [
            pins.gpio6.into_pull_up_input().into_dyn_pin(),
            pins.gpio7.into_pull_up_input().into_dyn_pin(),
            pins.gpio8.into_pull_up_input().into_dyn_pin(),
            pins.gpio9.into_pull_up_input().into_dyn_pin(),
        ],
    ]);

    let device_info = DeviceInfo {
        manufacturer: "ANAVI",
        vendor_id: 0xceeb,
        product_id: 0x0007,
        product_name: "ANAVI Macro Pad 8",
        serial_number: "8",
    };

    let keyboard = Controller::new(
        UsbCommunicator::new(device_info, USB_BUS.as_ref().unwrap()).unwrap(),
        switches,
        Layout::default(),
        VimProcessor::new(),
    );
    cortex_m::interrupt::free(|cs| unsafe {
        KEYBOARD.borrow(cs).replace(Some(keyboard));
    });

    unsafe {
        // Enable the USB interrupt
        pac::NVIC::unmask(pac::Interrupt::USBCTRL_IRQ);
        pac::NVIC::unmask(pac::Interrupt::TIMER_IRQ_0);
    }

    // defmt のタイムスタンプを実装します
    static COUNT: AtomicUsize = AtomicUsize::new(0);
    defmt::timestamp!("{=usize}", {
        // NOTE(no-CAS) `timestamps` runs with interrupts disabled
        let n = COUNT.load(Ordering::Relaxed);
        COUNT.store(n + 1, Ordering::Relaxed);
        n
    });

    core1
        .spawn(unsafe { &mut CORE1_STACK.mem }, move || loop {
            let snapshot = cortex_m::interrupt::free(|cs| unsafe {
                let _lock = Spinlock0::claim();
                KEYBOARD
                    .borrow(cs)
                    .borrow()
                    .as_ref()
                    .map(|keyboard| (keyboard.get_state(), keyboard.processor().clone()))
            });
            if let Some((state, processor)) = snapshot {
                show(&mut display, &Status::new(&state, processor.label()));
            }
        })
        .unwrap();

    watchdog.pause_on_debug(true);
    watchdog.start(1_000_000.micros());

    loop {
        cortex_m::interrupt::free(|cs| unsafe {
            let _lock = Spinlock0::claim();
            if let Some(keyboard) = KEYBOARD.borrow(cs).borrow_mut().as_mut() {
                keyboard.main_loop();
            }
        });
        watchdog.feed();
        cortex_m::asm::delay(SCAN_INTERVAL_CYCLES);
    }
}

fn show<D: KeyboardDisplay>(display: &mut D, status: &Status) {
    if draw_status(display, status).is_err() {
        defmt::warn!("Failed to draw status");
        return;
    }
    if D::REQUIRES_FLUSH {
        display.flush().ok();
    }
}

#[allow(non_snake_case)]
#[interrupt]
fn USBCTRL_IRQ() {
    cortex_m::interrupt::free(|cs| unsafe {
        let _lock = Spinlock0::claim();
        if let Some(keyboard) = KEYBOARD.borrow(cs).borrow_mut().as_mut() {
            keyboard.communicator.poll();
        }
    });
}

#[allow(non_snake_case)]
#[interrupt]
fn TIMER_IRQ_0() {
    cortex_m::interrupt::free(|cs| unsafe {
        if let Some(alarm) = ALARM.borrow(cs).borrow_mut().as_mut() {
            alarm.clear_interrupt();
            alarm.schedule(USB_SEND_INTERVAL_MICROS.micros()).ok();
        }
        let _lock = Spinlock0::claim();
        if let Some(Err(e)) = KEYBOARD
            .borrow(cs)
            .borrow_mut()
            .as_mut()
            .map(KeyboardType::send_keys)
        {
            defmt::warn!("UsbError: {}", defmt::Debug2Format(&e));
        }
    });
}
