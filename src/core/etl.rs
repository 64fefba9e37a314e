use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    name: &'static str,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(name: &'static str, pipeline: P) -> Self {
        Self { pipeline, name }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract, transform and load in order and returns the output location.
    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("🚀 Starting {} stage", self.name);

        tracing::debug!("Extracting data...");
        let raw_data = self.pipeline.extract().await?;

        tracing::debug!("Transforming data...");
        let transformed = self.pipeline.transform(raw_data).await?;

        tracing::debug!("Loading data...");
        let output_path = self.pipeline.load(transformed).await?;

        tracing::info!(
            "✅ {} stage finished in {:?}, output: {}",
            self.name,
            started.elapsed(),
            output_path
        );
        Ok(output_path)
    }
}
