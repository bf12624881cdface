use core::time::Duration;

/// Services the glue needs from the kernel it runs in.
pub trait KernelOp: Send + Sync + 'static {
    fn delay(&self, duration: Duration);
}

/// Spin delay for early boot, before a timer is available (CPU-speed dependent).
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinKernel;

impl KernelOp for SpinKernel {
    fn delay(&self, duration: Duration) {
        for _ in 0..spin_loops(duration) {
            core::hint::spin_loop();
        }
    }
}

const SPIN_LOOPS_PER_US: u64 = 100;

fn spin_loops(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros())
        .unwrap_or(u64::MAX)
        .saturating_mul(SPIN_LOOPS_PER_US)
}

/// Calls `read` every `step` until `cond` accepts the value or `timeout`
/// has elapsed. Both arms carry the last value read.
pub(crate) fn read_poll_timeout<T: Copy>(
    kernel: &dyn KernelOp,
    timeout: Duration,
    step: Duration,
    mut read: impl FnMut() -> T,
    cond: impl Fn(T) -> bool,
) -> core::result::Result<T, T> {
    let mut waited = Duration::ZERO;
    loop {
        let value = read();
        if cond(value) {
            return Ok(value);
        }
        if waited >= timeout {
            return Err(value);
        }
        kernel.delay(step);
        waited += step;
    }
}
