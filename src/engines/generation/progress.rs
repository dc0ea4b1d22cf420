use super::evolution_engine::{GenerationSummary, ProgressCallback};

pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        println!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, summary: &GenerationSummary) {
        println!(
            "Generation {} complete. Best: {:.4}, Mean: {:.4}, Worst: {:.4}",
            generation + 1,
            summary.best,
            summary.mean,
            summary.worst
        );
    }
}

/// Discards all progress events; used by embedding code and tests.
pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _generation: usize, _summary: &GenerationSummary) {}
}

// For streaming progress to an external reporting surface
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete {
        generation: usize,
        summary: GenerationSummary,
    },
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, generation: usize, summary: &GenerationSummary) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            summary: summary.clone(),
        });
    }
}
