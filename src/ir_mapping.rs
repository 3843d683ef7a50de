//! A generic device abstraction for mapping IR remote buttons to
//! application-specific actions.
//!
//! See [`IrMapping`] for usage examples.

use embassy_executor::Spawner;
use embassy_rp::gpio::Pin;
use heapless::LinearMap;

use crate::ir::{Ir, IrNotifier};
use crate::Result;

/// Maps decoded (address, command) pairs to a user-defined button type.
///
/// Repeat sentinels are skipped, so holding a button yields one event.
///
/// # Examples
/// ```no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// # use embassy_executor::Spawner;
/// # use ir_kit::IrMapping;
/// # #[derive(Debug, Clone, Copy, PartialEq)]
/// # enum MyButton { Power, Play, Stop }
/// # async fn example(p: embassy_rp::Peripherals, spawner: Spawner) -> ir_kit::Result<()> {
/// static NOTIFIER: ir_kit::IrNotifier = IrMapping::<MyButton, 3>::notifier();
///
/// let button_map = [
///     (0x0000, 0x45, MyButton::Power),
///     (0x0000, 0x0C, MyButton::Play),
///     (0x0000, 0x08, MyButton::Stop),
/// ];
///
/// let remote = IrMapping::new(p.PIN_28, &button_map, &NOTIFIER, spawner)?;
///
/// loop {
///     let button = remote.wait().await;
/// }
/// # }
/// ```
pub struct IrMapping<'a, B, const N: usize> {
    ir: Ir<'a>,
    button_map: LinearMap<(u16, u32), B, N>,
}

impl<'a, B, const N: usize> IrMapping<'a, B, N>
where
    B: Copy,
{
    /// Create the static channel resource for decoded frames.
    ///
    /// See [`IrMapping`] for usage examples.
    #[must_use]
    pub const fn notifier() -> IrNotifier {
        Ir::notifier()
    }

    /// Create a new IR remote button mapper.
    ///
    /// # Parameters
    /// - `pin`: GPIO pin connected to the IR receiver
    /// - `button_map`: Array mapping (address, command) pairs to button types
    /// - `notifier`: Static reference to the notifier channel
    /// - `spawner`: Embassy spawner for the background task
    ///
    /// See [`IrMapping`] for usage examples.
    ///
    /// # Errors
    /// Returns an error if the background task cannot be spawned.
    pub fn new(
        pin: impl Pin,
        button_map: &[(u16, u32, B)],
        notifier: &'static IrNotifier,
        spawner: Spawner,
    ) -> Result<Self> {
        let ir = Ir::new(pin, notifier, spawner)?;

        let mut map = LinearMap::new();
        for &(address, command, button) in button_map {
            let _ = map.insert((address, command), button);
        }

        Ok(Self {
            ir,
            button_map: map,
        })
    }

    /// Wait for the next mapped button press; unmapped frames and repeat
    /// sentinels are discarded.
    pub async fn wait(&self) -> B {
        loop {
            let frame = self.ir.next_frame().await;
            if frame.is_nec_repeat() {
                continue;
            }
            if let Some(button) = self.button_map.get(&(frame.address, frame.command)) {
                return *button;
            }
        }
    }
}
