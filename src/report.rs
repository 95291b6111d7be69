// 8.0: fire-and-forget operator messages. soft failures are surfaced twice: once
// in the run's returned error text and once through this sink, so a UI can show
// warnings while the run is still in flight.

pub trait ErrorSink {
    fn report(&mut self, message: String);
}

// 8.1: Vec-backed sink for tests and the simulation binary.
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Vec<String>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl ErrorSink for CollectingSink {
    fn report(&mut self, message: String) {
        self.messages.push(message);
    }
}

// 8.2: sink that drops everything, for callers without an operator surface.
#[derive(Debug, Default)]
pub struct NullSink;

impl ErrorSink for NullSink {
    fn report(&mut self, _message: String) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_sink_keeps_order() {
        let mut sink = CollectingSink::new();
        sink.report("first".to_string());
        sink.report("second".to_string());
        assert_eq!(sink.messages(), ["first", "second"]);

        sink.clear();
        assert!(sink.messages().is_empty());
    }
}
