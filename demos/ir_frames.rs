#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use ir_kit::{Ir, IrNotifier, Protocol};
use panic_probe as _;

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    info!("IR frame example starting...");

    // Create the notifier channel
    static NOTIFIER: IrNotifier = Ir::notifier();

    // Initialize the IR receiver on GP28 (active-low IR modules idle HIGH)
    let ir = Ir::new(p.PIN_28, &NOTIFIER, spawner).expect("Failed to initialize IR receiver");

    info!("IR receiver initialized on GP28");

    // Main loop: print every decoded frame
    loop {
        let frame = ir.next_frame().await;
        match frame.protocol {
            Protocol::Nec if frame.is_nec_repeat() => {
                info!("NEC repeat (button held)");
            }
            Protocol::Nec => {
                info!(
                    "NEC press - addr=0x{:04X} cmd=0x{:02X}",
                    frame.address, frame.command
                );
            }
            Protocol::Panasonic => {
                info!(
                    "Panasonic press - addr=0x{:04X} cmd=0x{:08X}",
                    frame.address, frame.command
                );
            }
            Protocol::Hash => {
                info!(
                    "Unknown remote - {} pulses, hash=0x{:08X}",
                    frame.address, frame.command
                );
            }
        }
    }
}
