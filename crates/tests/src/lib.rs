//! # Integration Tests
//!
//! Cross-crate and end-to-end tests.
//!
//! Covers:
//! - Contract checks on severities and errors
//! - Dispatcher behavior against real files and captured consoles
//! - Configuration to dispatcher round trips

#[cfg(test)]
mod support {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// Cloneable in-memory writer standing in for a terminal stream
    #[derive(Clone, Default)]
    pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }

        pub fn lines(&self) -> Vec<String> {
            self.contents().lines().map(str::to_string).collect()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod contract_tests {
    use contracts::{parse_severity, ContractError, Severity};

    #[test]
    fn test_unknown_level_is_rejected() {
        let err = parse_severity("loud").unwrap_err();
        assert!(matches!(err, ContractError::InvalidSeverity { .. }));
    }

    #[test]
    fn test_level_names_ignore_case() {
        for input in ["warning", "WARNING", "Warning", "wArNiNg"] {
            assert_eq!(parse_severity(input).unwrap(), Severity::Warning);
        }
    }

    #[test]
    fn test_severity_total_order() {
        let all = Severity::ALL;
        for pair in all.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].rank() < pair[1].rank());
        }
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;

    use contracts::{ConsoleTarget, ContractError, Severity};
    use dispatcher::{
        ConsoleSink, DispatcherError, FileSink, LogDispatcher, MemorySink, PlainFormatter,
    };
    use tempfile::tempdir;

    use crate::support::SharedBuffer;

    fn captured_console(threshold: Severity) -> (ConsoleSink, SharedBuffer) {
        let out = SharedBuffer::default();
        let sink = ConsoleSink::with_writers(threshold, out.clone(), out.clone())
            .with_target(ConsoleTarget::Stdout)
            .with_formatter(PlainFormatter::new());
        (sink, out)
    }

    /// Console at INFO and file at DEBUG: DEBUG reaches the file only, CRITICAL reaches both
    #[test]
    fn test_console_and_file_thresholds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.log");
        let (console, out) = captured_console(Severity::Info);

        let dispatcher = LogDispatcher::builder("app")
            .sink("console", console)
            .sink("file", FileSink::open(&path, Severity::Debug).unwrap())
            .build()
            .unwrap();

        dispatcher.emit(Severity::Debug, "x").unwrap();
        let file_lines = dispatcher.read_back("file").unwrap();
        assert_eq!(file_lines.len(), 1);
        assert!(file_lines[0].contains("x"));
        assert!(file_lines[0].contains("DEBUG"));
        assert!(out.contents().is_empty());

        dispatcher.emit(Severity::Critical, "y").unwrap();
        let file_lines = dispatcher.read_back("file").unwrap();
        assert_eq!(file_lines.len(), 2);
        assert!(file_lines[1].contains("y"));
        let console_lines = out.lines();
        assert_eq!(console_lines.len(), 1);
        assert!(console_lines[0].contains("y"));
        assert!(console_lines[0].contains("CRITICAL"));
    }

    /// An unwritable file fails alone; the console still gets the record
    #[cfg(target_os = "linux")]
    #[test]
    fn test_unwritable_file_yields_single_failure() {
        let (console, out) = captured_console(Severity::Debug);
        let dispatcher = LogDispatcher::builder("app")
            .sink("console", console)
            .sink("file", FileSink::open("/dev/full", Severity::Debug).unwrap())
            .build()
            .unwrap();

        let err = dispatcher.emit(Severity::Error, "disk trouble").unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.sink_names(), vec!["file"]);
        assert!(matches!(err.failures()[0].error, ContractError::IoWrite { .. }));
        assert!(out.contents().contains("disk trouble"));

        let metrics = dispatcher.metrics();
        assert_eq!(metrics[0].1.write_count, 1);
        assert_eq!(metrics[1].1.failure_count, 1);
    }

    /// A record reaches a sink exactly when its severity meets the threshold
    #[test]
    fn test_threshold_gate_for_every_pair() {
        for threshold in Severity::ALL {
            for severity in Severity::ALL {
                let sink = MemorySink::new(threshold);
                let handle = sink.handle();
                let dispatcher = LogDispatcher::new("gate");
                dispatcher.add_sink("mem", sink).unwrap();

                dispatcher.emit(severity, "probe").unwrap();
                assert_eq!(
                    handle.len(),
                    usize::from(severity >= threshold),
                    "threshold {threshold}, severity {severity}"
                );
            }
        }
    }

    /// With N qualifying sinks of which K fail, the error lists exactly K entries
    #[test]
    fn test_k_of_n_failures_reported() {
        let dir = tempdir().unwrap();
        let dispatcher = LogDispatcher::new("mixed");
        let mut memories = Vec::new();

        for i in 0..3 {
            let sink = MemorySink::new(Severity::Debug);
            memories.push(sink.handle());
            dispatcher.add_sink(format!("mem{i}"), sink).unwrap();
        }
        for i in 0..2 {
            let mut file = FileSink::open(dir.path().join(format!("f{i}.log")), Severity::Debug)
                .unwrap();
            contracts::LogSink::close(&mut file).unwrap();
            dispatcher.add_sink(format!("closed{i}"), file).unwrap();
        }

        let err = dispatcher.emit(Severity::Warning, "partial").unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(err.sink_names(), vec!["closed0", "closed1"]);
        for handle in &memories {
            assert_eq!(handle.len(), 1);
        }
    }

    #[test]
    fn test_duplicate_and_missing_names() {
        let dispatcher = LogDispatcher::new("names");
        dispatcher
            .add_sink("a", MemorySink::new(Severity::Debug))
            .unwrap();

        let err = dispatcher
            .add_sink("a", MemorySink::new(Severity::Info))
            .unwrap_err();
        assert!(matches!(err, DispatcherError::DuplicateName { .. }));
        assert_eq!(dispatcher.threshold("a").unwrap(), Severity::Debug);

        assert!(matches!(
            dispatcher.remove_sink("b"),
            Err(DispatcherError::NotFound { .. })
        ));
        assert!(matches!(
            dispatcher.set_threshold("b", Severity::Error),
            Err(DispatcherError::NotFound { .. })
        ));
        assert_eq!(dispatcher.sink_names(), vec!["a".to_string()]);
    }

    #[test]
    fn test_clear_then_read_back_is_empty() {
        let dir = tempdir().unwrap();
        let dispatcher = LogDispatcher::new("clear");
        dispatcher
            .add_sink(
                "file",
                FileSink::open(dir.path().join("c.log"), Severity::Debug).unwrap(),
            )
            .unwrap();

        dispatcher.info("one").unwrap();
        dispatcher.info("two").unwrap();
        assert_eq!(dispatcher.read_back("file").unwrap().len(), 2);

        dispatcher.clear("file").unwrap();
        assert!(dispatcher.read_back("file").unwrap().is_empty());

        dispatcher.info("three").unwrap();
        let lines = dispatcher.read_back("file").unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("three"));
    }

    #[test]
    fn test_console_clear_is_unsupported() {
        let (console, _out) = captured_console(Severity::Info);
        let dispatcher = LogDispatcher::new("console");
        dispatcher.add_sink("console", console).unwrap();

        assert!(matches!(
            dispatcher.clear("console"),
            Err(DispatcherError::UnsupportedOperation { .. })
        ));
    }

    /// Sinks come and go while other threads emit; nothing is lost on the surviving sink
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_reconfigure_during_emission() {
        let dispatcher = Arc::new(LogDispatcher::new("busy"));
        let stable = MemorySink::new(Severity::Debug);
        let stable_handle = stable.handle();
        dispatcher.add_sink("stable", stable).unwrap();

        let mut tasks = Vec::new();
        for worker in 0..4 {
            let dispatcher = Arc::clone(&dispatcher);
            tasks.push(tokio::task::spawn_blocking(move || {
                for i in 0..100 {
                    dispatcher
                        .emit(Severity::Info, format!("w{worker} n{i}"))
                        .unwrap();
                }
            }));
        }

        let churn = {
            let dispatcher = Arc::clone(&dispatcher);
            tokio::task::spawn_blocking(move || {
                for round in 0..50 {
                    let name = format!("temp{round}");
                    dispatcher
                        .add_sink(name.clone(), MemorySink::new(Severity::Debug))
                        .unwrap();
                    dispatcher.set_threshold(&name, Severity::Error).unwrap();
                    dispatcher.remove_sink(&name).unwrap();
                }
            })
        };

        for task in tasks {
            task.await.unwrap();
        }
        churn.await.unwrap();

        assert_eq!(stable_handle.len(), 400);
        assert_eq!(dispatcher.sink_names(), vec!["stable".to_string()]);
    }
}

#[cfg(test)]
mod config_tests {
    use config_loader::ConfigLoader;
    use contracts::Severity;
    use dispatcher::create_dispatcher;
    use observability::EmissionAggregator;
    use tempfile::tempdir;

    #[test]
    fn test_config_to_dispatcher() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("logs").join("app.log");
        let toml = format!(
            r#"
name = "service"

[[sinks]]
name = "file"
sink_type = "file"
threshold = "warning"
path = "{}"

[[sinks]]
name = "mem"
sink_type = "memory"
"#,
            log.display()
        );

        let blueprint = ConfigLoader::load_from_str(&toml, config_loader::ConfigFormat::Toml)
            .unwrap();
        let dispatcher = create_dispatcher(&blueprint).unwrap();
        assert_eq!(dispatcher.name(), "service");
        assert_eq!(dispatcher.sink_names(), vec!["file", "mem"]);

        let mut aggregator = EmissionAggregator::new();
        for (severity, msg) in [
            (Severity::Info, "started"),
            (Severity::Warning, "slow request"),
            (Severity::Critical, "shutting down"),
        ] {
            dispatcher.emit(severity, msg).unwrap();
            aggregator.update(severity, &[]);
        }

        let lines = dispatcher.read_back("file").unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("slow request"));
        assert!(lines[1].contains("shutting down"));
        assert_eq!(dispatcher.read_back("mem").unwrap().len(), 3);
        assert_eq!(aggregator.summary().total, 3);
    }

    #[test]
    fn test_file_sink_without_path_is_rejected() {
        let toml = r#"
name = "service"

[[sinks]]
name = "file"
sink_type = "file"
"#;
        assert!(ConfigLoader::load_from_str(toml, config_loader::ConfigFormat::Toml).is_err());
    }
}
