use std::cell::Cell;
use std::time::Instant;

/// 性能统计 Guard：记录 elapsed_ms + 处理条目数
///
/// 使用方式：
/// ```ignore
/// let perf = agency_ecart_report::perf::PerfGuard::new("load_agencies");
/// perf.add_items(rows);
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    items: Cell<u64>,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
            items: Cell::new(0),
        }
    }

    /// 累加处理条目数（行数/报表数，由调用方定义）
    pub fn add_items(&self, n: usize) {
        self.items
            .set(self.items.get().saturating_add(n as u64));
    }

    pub fn items(&self) -> u64 {
        self.items.get()
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            items = self.items.get(),
            "done"
        );
    }
}
