/// Milliseconds on a host-provided monotonic-enough timebase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Millis(pub u64);

impl Millis {
    pub fn saturating_add(self, ms: u64) -> Self {
        Millis(self.0.saturating_add(ms))
    }
}
