#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use ir_kit::{IrMapping, IrNotifier};
use panic_probe as _;

#[derive(Debug, Clone, Copy, PartialEq, defmt::Format)]
enum Button {
    Power,
    VolumeUp,
    VolumeDown,
}

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    static NOTIFIER: IrNotifier = IrMapping::<Button, 3>::notifier();

    // Codes from a generic NEC media remote; adjust to yours (run the
    // ir_frames example to discover them).
    let button_map = [
        (0x2222, 0x02, Button::Power),
        (0x2222, 0x15, Button::VolumeUp),
        (0x2222, 0x07, Button::VolumeDown),
    ];

    let remote = IrMapping::new(p.PIN_28, &button_map, &NOTIFIER, spawner)
        .expect("Failed to initialize IR receiver");

    info!("IR button mapper initialized on GP28");

    loop {
        let button = remote.wait().await;
        info!("Button pressed: {}", button);
    }
}
