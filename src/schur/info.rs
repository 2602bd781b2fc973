use crate::schur::KernelVariant;
use crate::timers::Timers;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Diagnostics gathered by a [`SchurAssembler`](crate::schur::SchurAssembler).
///
/// Phase times are in seconds and are only recorded when
/// `collect_timings` is set.  They describe the most recent call.
#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SchurInfo {
    /// entries written by the most recent call
    pub nnz: usize,
    /// entries written over all calls
    pub total_nnz: usize,
    /// number of successful calls
    pub calls: usize,
    /// column end of the most recent call
    pub colend: usize,
    /// kernel used by the most recent call
    pub variant: Option<KernelVariant>,

    pub validate_time: f64,
    pub densify_time: f64,
    pub offsets_time: f64,
    pub kernel_time: f64,
    pub total_time: f64,
}

impl SchurInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_call(&mut self, nnz: usize, colend: usize, variant: KernelVariant) {
        self.nnz = nnz;
        self.total_nnz += nnz;
        self.calls += 1;
        self.colend = colend;
        self.variant = Some(variant);
    }

    pub(crate) fn record_timings(&mut self, timers: &Timers) {
        self.validate_time = timers.elapsed(&["update", "validate"]).as_secs_f64();
        self.densify_time = timers.elapsed(&["update", "densify"]).as_secs_f64();
        self.offsets_time = timers.elapsed(&["update", "offsets"]).as_secs_f64();
        self.kernel_time = timers.elapsed(&["update", "kernel"]).as_secs_f64();
        self.total_time = timers.elapsed(&["update"]).as_secs_f64();
    }

    /// writes a one line summary of the most recent call to the info log
    pub fn log_summary(&self) {
        let variant = self
            .variant
            .map_or_else(|| String::from("none"), |v| v.to_string());
        tracing::info!(
            nnz = self.nnz,
            colend = self.colend,
            calls = self.calls,
            "schur update ({}): {} entries written, {} in total",
            variant,
            self.nnz,
            self.total_nnz
        );
        if self.total_time <= 0.0 {
            return;
        }
        // densify and offsets only run for block sparse operands
        if self.variant.is_some_and(|v| v.is_sparse()) {
            tracing::info!(
                "schur timings: validate {:.3e}s, densify {:.3e}s, offsets {:.3e}s, kernel {:.3e}s, total {:.3e}s",
                self.validate_time,
                self.densify_time,
                self.offsets_time,
                self.kernel_time,
                self.total_time
            );
        } else {
            tracing::info!(
                "schur timings: validate {:.3e}s, kernel {:.3e}s, total {:.3e}s",
                self.validate_time,
                self.kernel_time,
                self.total_time
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_call() {
        let mut info = SchurInfo::new();
        info.log_summary();

        info.record_call(3, 2, KernelVariant::SparseMixed);
        info.record_call(4, 2, KernelVariant::DenseSquared);
        assert_eq!(info.nnz, 4);
        assert_eq!(info.total_nnz, 7);
        assert_eq!(info.calls, 2);
        assert_eq!(info.variant, Some(KernelVariant::DenseSquared));

        info.total_time = 1e-3;
        info.log_summary();
        info.variant = Some(KernelVariant::SparseSquared);
        info.log_summary();
    }
}
