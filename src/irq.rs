//! Interrupt-to-foreground signalling.

use core::sync::atomic::{AtomicBool, Ordering};

/// The three event flags shared between interrupt handlers and the
/// foreground poll loop.
///
/// Each flag has exactly one interrupt-side writer and one foreground
/// consumer. Setting is a relaxed store; consuming is an atomic swap, so a
/// set that races a consume is never lost; the event is simply serviced on
/// the next loop iteration. On cores without atomic swap (ARMv6-M class),
/// wrap the consuming calls in a critical section instead.
///
/// Place an instance in a `static` and hand the reference to both the
/// interrupt handlers and [`Receiver`](crate::receiver::Receiver):
///
/// ```
/// use rc24::IrqFlags;
///
/// static FLAGS: IrqFlags = IrqFlags::new();
///
/// // from the radio IRQ handler:
/// FLAGS.radio_irq();
/// ```
pub struct IrqFlags {
    rf_int_fired: AtomicBool,
    perform_hop_requested: AtomicBool,
    systick: AtomicBool,
}

impl IrqFlags {
    pub const fn new() -> Self {
        IrqFlags {
            rf_int_fired: AtomicBool::new(false),
            perform_hop_requested: AtomicBool::new(false),
            systick: AtomicBool::new(false),
        }
    }

    /// Call from the radio IRQ handler: one or more payloads wait in the
    /// RX FIFO.
    pub fn radio_irq(&self) {
        self.rf_int_fired.store(true, Ordering::Relaxed);
    }

    /// Call from the hop timer expiration handler.
    pub fn hop_timer_fired(&self) {
        self.perform_hop_requested.store(true, Ordering::Relaxed);
    }

    /// Call from the system tick handler.
    pub fn tick(&self) {
        self.systick.store(true, Ordering::Relaxed);
    }

    pub(crate) fn take_radio_irq(&self) -> bool {
        self.rf_int_fired.swap(false, Ordering::Relaxed)
    }

    pub(crate) fn take_hop(&self) -> bool {
        self.perform_hop_requested.swap(false, Ordering::Relaxed)
    }

    pub(crate) fn take_tick(&self) -> bool {
        self.systick.swap(false, Ordering::Relaxed)
    }

    pub(crate) fn clear_radio_irq(&self) {
        self.rf_int_fired.store(false, Ordering::Relaxed);
    }

    pub(crate) fn clear_hop(&self) {
        self.perform_hop_requested.store(false, Ordering::Relaxed);
    }
}

impl Default for IrqFlags {
    fn default() -> Self {
        Self::new()
    }
}
