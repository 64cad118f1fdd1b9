// Full report: fixed banners and "<Label>: <value>" lines, rebuilt on every call

use std::fmt;

use crate::probe::HostProbe;
use crate::snapshot::SystemSnapshot;

#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

pub const APP_BANNER: &str = "#################### App Info ####################";
pub const MEMORY_BANNER: &str = "############## Memory ################";
pub const SYSTEM_BANNER: &str = "############## System ###############";
pub const RUNTIME_BANNER: &str = "############## Runtime ##############";
pub const THREAD_BANNER: &str = "############## Thread ###############";
pub const SECTION_END: &str = "#####################################";
pub const REPORT_END: &str = "##################################################";

/// Accumulates separator-terminated lines.
#[derive(Default)]
struct ReportBuilder {
    buf: String,
}

impl ReportBuilder {
    fn line(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self.buf.push_str(LINE_SEPARATOR);
        self
    }

    fn field(&mut self, label: &str, value: impl fmt::Display) -> &mut Self {
        self.line(&format!("{}: {}", label, value))
    }

    /// Label on its own line followed by an already line-terminated block.
    fn block(&mut self, label: &str, body: &str) -> &mut Self {
        self.line(&format!("{}:{}{}", label, LINE_SEPARATOR, body))
    }

    fn finish(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}

impl<P: HostProbe> SystemSnapshot<P> {
    /// Render every section in fixed order: App, Memory, System, Runtime, Thread.
    pub fn full_report(&self) -> String {
        let mut r = ReportBuilder::default();
        r.line(APP_BANNER);

        r.line(MEMORY_BANNER)
            .field("Heap init", self.heap_init())
            .field("Heap used", self.heap_used())
            .field("Heap committed", self.heap_committed())
            .field("Heap max", self.heap_max())
            .field("Free memory", self.free_memory())
            .field("Max memory", self.max_memory())
            .field("Total memory", self.total_memory())
            .line(SECTION_END);

        r.line(SYSTEM_BANNER)
            .field("Process CPU load", decimal(self.process_cpu_load()))
            .field("System CPU load", decimal(self.system_cpu_load()))
            .field("System name", self.system_name())
            .field("System version", self.system_version())
            .field("System load in the last minute", decimal(self.system_load()))
            .field("System available processors", self.available_processors())
            .field("Storage Metrics", self.storage_metrics())
            .line(SECTION_END);

        r.line(RUNTIME_BANNER)
            .field("Runtime version", self.runtime_version())
            .field("Input Arguments", self.input_arguments())
            .field("Start Time", self.start_time())
            .field("Up Time", self.up_time())
            .field("Library Path", self.library_path())
            .field("Module Path", self.module_path())
            .block("System Properties", &self.system_properties())
            .line(SECTION_END);

        r.line(THREAD_BANNER)
            .field("Threads count", self.thread_count())
            .block("Threads statuses", &self.thread_statuses())
            .line(REPORT_END);

        r.finish()
    }
}

/// Always shows a fraction, so `-1` prints as `-1.0` and a zero load as `0.0`.
fn decimal(value: f64) -> String {
    format!("{:?}", value)
}

impl<P: HostProbe> fmt::Display for SystemSnapshot<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_report())
    }
}
