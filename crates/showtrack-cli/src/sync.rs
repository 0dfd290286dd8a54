use showtrack_core::cloud::SyncScheduler;

/// Records full-sync requests for the command's report. The CLI has no
/// background sync engine; the next sync run picks the request up.
#[derive(Debug, Default)]
pub struct ConsoleSyncScheduler {
    requests: Vec<bool>,
}

impl ConsoleSyncScheduler {
    pub fn report_lines(&self) -> Vec<String> {
        self.requests
            .iter()
            .map(|immediate| {
                if *immediate {
                    "Full sync scheduled to run now".to_string()
                } else {
                    "Full sync scheduled".to_string()
                }
            })
            .collect()
    }
}

impl SyncScheduler for ConsoleSyncScheduler {
    fn request_full_sync(&mut self, immediate: bool) {
        tracing::info!(immediate, "Full sync requested");
        self.requests.push(immediate);
    }
}
