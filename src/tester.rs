use crate::{
    checks::{
        check_completion, check_connectivity, check_format, check_model_availability, CheckKind,
        CheckResult, FailureKind,
    },
    client::{ApiClient, OpenAiClient},
    config::Config,
    output::Console,
    report::TestReport,
};
use tracing::{debug, info};

/// Runs the format, connectivity, model and completion checks in order.
pub struct KeyTester {
    config: Config,
    console: Console,
    client: Option<Box<dyn ApiClient>>,
    fail_fast: bool,
}

impl KeyTester {
    pub fn new(config: Config, console: Console) -> Self {
        Self {
            config,
            console,
            client: None,
            fail_fast: false,
        }
    }

    /// Use `client` instead of building an HTTP client from the config.
    pub fn with_client(mut self, client: Box<dyn ApiClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Also stop after a failed connectivity check.
    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    /// Runs every applicable check, prints the summary and returns the report.
    pub async fn run(&self) -> TestReport {
        self.console.header("🤖 OpenAI API Key Tester");
        self.console.blank();

        let report = self.run_checks().await;

        self.console.summary(&report);
        info!("Finished: {}/{} checks passed", report.passed(), report.total());
        report
    }

    async fn run_checks(&self) -> TestReport {
        let mut report = TestReport::new();

        self.console.info("Step 1: Checking API key format...");
        if let Some(masked) = self.config.masked_key() {
            self.console.info(&format!("Using API key: {}", masked));
        }
        let format = check_format(self.config.api_key.as_deref());
        if !self.record(&mut report, format) {
            debug!("Key format invalid, skipping network checks");
            return report;
        }

        let built;
        let client: &dyn ApiClient = match &self.client {
            Some(client) => &**client,
            None => match self.build_client() {
                Ok(client) => {
                    built = client;
                    &built
                }
                Err(result) => {
                    self.record(&mut report, result);
                    return report;
                }
            },
        };

        self.console.info("Step 2: Testing connectivity...");
        self.console
            .info(&format!("Connecting to {}", self.config.endpoint("models")));
        let connected = self.record(&mut report, check_connectivity(client).await);
        if !connected && self.fail_fast {
            debug!("Connectivity failed with fail-fast enabled, stopping");
            return report;
        }

        self.console.info("Step 3: Checking model availability...");
        self.console
            .info(&format!("Checking availability of model: {}", self.config.model));
        let availability = check_model_availability(client, &self.config.model).await;
        let model = match availability.detail.as_deref() {
            Some(resolved) if availability.passed => resolved.to_string(),
            _ => self.config.model.clone(),
        };
        if model != self.config.model {
            self.console.warning(&format!(
                "Model {} not found. Using fallback model {}.",
                self.config.model, model
            ));
        }
        self.record(&mut report, availability);

        self.console.info("Step 4: Testing simple completion...");
        self.console
            .info(&format!("Testing completion with model: {}", model));
        let completion = check_completion(client, &model).await;
        if let Some(text) = completion.detail.as_deref().filter(|_| completion.passed) {
            self.console.success(&completion.message);
            self.console.info(&format!("Response: {}", text));
            report.push(completion);
            self.console.blank();
        } else {
            self.record(&mut report, completion);
        }

        report
    }

    fn build_client(&self) -> Result<OpenAiClient, CheckResult> {
        let key = self.config.api_key.clone().unwrap_or_default();
        OpenAiClient::new(&self.config, key).map_err(|e| {
            CheckResult::fail(
                CheckKind::Connectivity,
                FailureKind::Unexpected,
                format!("Failed to create HTTP client: {}", e),
            )
        })
    }

    /// Prints the outcome line, stores the result and returns whether it passed.
    fn record(&self, report: &mut TestReport, result: CheckResult) -> bool {
        let passed = result.passed;
        if passed {
            self.console.success(&result.message);
        } else {
            self.console.error(&result.message);
        }
        debug!(check = %result.kind, passed, "Check finished");
        report.push(result);
        self.console.blank();
        passed
    }
}
