//! Batch scaffolding of samples.

use log::info;

use crate::error::{Error, Result};
use crate::sample::Sample;

/// Callback run before or after one generation stage of a sample.
pub type Hook = Box<dyn Fn(&dyn Sample) -> Result<()>>;

#[derive(Clone, Copy)]
enum Stage {
    Init,
    Api,
    Webhook,
}

impl Stage {
    fn name(self) -> &'static str {
        match self {
            Stage::Init => "init",
            Stage::Api => "api",
            Stage::Webhook => "webhook",
        }
    }
}

/// Runs the `init`, `create api` and `create webhook` stages over a list of
/// samples.
///
/// Every stage is enabled by default. Samples are processed one after the
/// other and the first failure aborts the whole batch.
pub struct Generator {
    init: bool,
    api: bool,
    webhook: bool,
    pre_init: Option<Hook>,
    post_init: Option<Hook>,
    pre_api: Option<Hook>,
    post_api: Option<Hook>,
    pre_webhook: Option<Hook>,
    post_webhook: Option<Hook>,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            init: true,
            api: true,
            webhook: true,
            pre_init: None,
            post_init: None,
            pre_api: None,
            post_api: None,
            pre_webhook: None,
            post_webhook: None,
        }
    }
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_no_init(mut self) -> Self {
        self.init = false;
        self
    }

    pub fn with_no_api(mut self) -> Self {
        self.api = false;
        self
    }

    pub fn with_no_webhook(mut self) -> Self {
        self.webhook = false;
        self
    }

    pub fn with_pre_init<F: Fn(&dyn Sample) -> Result<()> + 'static>(mut self, hook: F) -> Self {
        self.pre_init = Some(Box::new(hook));
        self
    }

    pub fn with_post_init<F: Fn(&dyn Sample) -> Result<()> + 'static>(mut self, hook: F) -> Self {
        self.post_init = Some(Box::new(hook));
        self
    }

    pub fn with_pre_api<F: Fn(&dyn Sample) -> Result<()> + 'static>(mut self, hook: F) -> Self {
        self.pre_api = Some(Box::new(hook));
        self
    }

    pub fn with_post_api<F: Fn(&dyn Sample) -> Result<()> + 'static>(mut self, hook: F) -> Self {
        self.post_api = Some(Box::new(hook));
        self
    }

    pub fn with_pre_webhook<F: Fn(&dyn Sample) -> Result<()> + 'static>(mut self, hook: F) -> Self {
        self.pre_webhook = Some(Box::new(hook));
        self
    }

    pub fn with_post_webhook<F: Fn(&dyn Sample) -> Result<()> + 'static>(
        mut self,
        hook: F,
    ) -> Self {
        self.post_webhook = Some(Box::new(hook));
        self
    }

    /// Generates every sample in order.
    ///
    /// # Errors
    /// * `Error::SampleGeneration` naming the failed stage and sample; hook
    ///   failures are reported against the stage they surround
    pub fn generate_samples(&self, samples: &[&dyn Sample]) -> Result<()> {
        for sample in samples {
            info!("Generating sample {}", sample.name());
            if self.init {
                self.run_stage(*sample, Stage::Init)?;
            }
            if self.api {
                self.run_stage(*sample, Stage::Api)?;
            }
            if self.webhook {
                self.run_stage(*sample, Stage::Webhook)?;
            }
        }
        Ok(())
    }

    fn run_stage(&self, sample: &dyn Sample, stage: Stage) -> Result<()> {
        self.hooked_stage(sample, stage).map_err(|source| Error::SampleGeneration {
            stage: stage.name(),
            sample: sample.name().to_string(),
            source: Box::new(source),
        })
    }

    fn hooked_stage(&self, sample: &dyn Sample, stage: Stage) -> Result<()> {
        let (pre, post) = match stage {
            Stage::Init => (&self.pre_init, &self.post_init),
            Stage::Api => (&self.pre_api, &self.post_api),
            Stage::Webhook => (&self.pre_webhook, &self.post_webhook),
        };

        if let Some(hook) = pre {
            hook(sample)?;
        }
        match stage {
            Stage::Init => sample.generate_init()?,
            Stage::Api => sample.generate_api()?,
            Stage::Webhook => sample.generate_webhook()?,
        }
        if let Some(hook) = post {
            hook(sample)?;
        }
        Ok(())
    }
}
