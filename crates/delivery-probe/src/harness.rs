//! FormTestHarness: drives one page through the card delivery form.
//!
//! Every scenario follows the same shape: open the form, fill it with
//! valid values except for one field, apply the defect, submit and wait
//! (bounded) for the observable outcome.

use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::context::FormContext;
use crate::driver::PageDriver;
use crate::expect::{expect, Expectation};
use crate::form::{
    meeting_date, notification_content, notification_title, submit_button, success_message,
    ExpectedOutcome, Field, SUCCESS_TITLE, VALID_NAME, VALID_PHONE,
};
use crate::locator::{Locator, Selector};
use crate::result::{HarnessError, HarnessResult};
use crate::scenario::Scenario;

/// Harness bound to one page and the shared run context
#[derive(Debug)]
pub struct FormTestHarness<D> {
    context: Arc<FormContext>,
    driver: D,
    rng: StdRng,
    today: NaiveDate,
}

impl<D: PageDriver> FormTestHarness<D> {
    /// Create a harness over `driver`; seeds from the config or entropy
    pub fn new(context: Arc<FormContext>, driver: D) -> Self {
        let rng = context
            .config()
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            context,
            driver,
            rng,
            today: Local::now().date_naive(),
        }
    }

    /// Reseed city selection
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Pin the date meeting dates are computed from
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Shared run context
    #[must_use]
    pub fn context(&self) -> &FormContext {
        &self.context
    }

    /// Underlying page driver
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Give back the page driver
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Valid meeting date: today plus the configured offset
    pub fn meeting_date(&self) -> HarnessResult<String> {
        let offset = self.context.config().day_offset;
        meeting_date(self.today, offset).ok_or_else(|| HarnessError::ConfigError {
            message: format!(
                "day offset {offset} from {} is past the last valid date",
                self.today
            ),
        })
    }

    /// Navigate to the form, resetting all in-page state
    pub async fn open_form(&mut self) -> HarnessResult<()> {
        let url = self.context.config().base_url.clone();
        debug!(%url, "opening form");
        self.driver.goto(&url).await
    }

    /// Fill every field with a valid value except `skip`
    pub async fn fill_valid_values(&mut self, skip: Option<Field>) -> HarnessResult<()> {
        for field in Field::ALL {
            if Some(field) == skip {
                debug!(%field, "skipping field");
                continue;
            }
            match field {
                Field::City => {
                    let city = self.context.cities().choose(&mut self.rng).to_string();
                    self.set_field(Field::City, &city).await?;
                }
                Field::Date => {
                    let date = self.meeting_date()?;
                    self.set_date_field(&date).await?;
                }
                Field::Name => self.set_field(Field::Name, VALID_NAME).await?,
                Field::Phone => self.set_field(Field::Phone, VALID_PHONE).await?,
                Field::Agreement => self.check_agreement().await?,
            }
        }
        Ok(())
    }

    /// Write `value` into a text field; the date goes through [`Self::set_date_field`]
    pub async fn set_field(&mut self, field: Field, value: &str) -> HarnessResult<()> {
        if field == Field::Date {
            return self.set_date_field(value).await;
        }
        debug!(%field, value, "filling field");
        self.driver.fill(&field.input(), value).await
    }

    /// Clear the date input with select-all + delete, then type `value`
    pub async fn set_date_field(&mut self, value: &str) -> HarnessResult<()> {
        let input = Field::Date.input();
        debug!(value, "setting date");
        self.driver.clear_with_keys(&input).await?;
        self.driver.type_text(&input, value).await
    }

    /// Tick the agreement checkbox
    pub async fn check_agreement(&mut self) -> HarnessResult<()> {
        debug!("checking agreement");
        self.driver.click(&Field::Agreement.input()).await
    }

    /// Press the submit button
    pub async fn submit(&mut self) -> HarnessResult<()> {
        debug!("submitting form");
        self.driver.click(&submit_button()).await
    }

    fn expect_within(&self, selector: Selector, timeout: Duration) -> Locator {
        Locator::from_selector(selector).with_timeout(timeout)
    }

    async fn verify(&self, expectation: Expectation) -> HarnessResult<()> {
        let _ = expectation
            .with_poll_interval(self.context.config().poll_interval)
            .verify(&self.driver)
            .await?;
        Ok(())
    }

    /// Wait for the date input to show `date`
    pub async fn verify_date_value(&self, date: &str) -> HarnessResult<()> {
        let timeout = self.context.config().assertion_timeout;
        self.verify(expect(self.expect_within(Field::Date.input(), timeout)).to_have_value(date))
            .await
    }

    /// Wait (bounded) for `outcome` to be observable
    pub async fn verify_outcome(&self, outcome: &ExpectedOutcome) -> HarnessResult<()> {
        let config = self.context.config();
        let timeout = config.assertion_timeout;
        match outcome {
            ExpectedOutcome::FieldError {
                field,
                message: Some(message),
            } => {
                let error = expect(self.expect_within(field.error_text(), timeout));
                self.verify(error.to_be_visible()).await?;
                self.verify(error.to_have_text(message.as_str())).await
            }
            ExpectedOutcome::FieldError {
                field,
                message: None,
            } => {
                let container = expect(self.expect_within(field.invalid_container(), timeout));
                self.verify(container.to_be_visible()).await
            }
            ExpectedOutcome::Success { date } => {
                let title =
                    expect(self.expect_within(notification_title(), config.success_timeout));
                self.verify(title.to_be_visible()).await?;
                self.verify(title.to_have_text(SUCCESS_TITLE).within(timeout))
                    .await?;
                let content = expect(self.expect_within(notification_content(), timeout));
                self.verify(content.to_have_text(success_message(date))).await
            }
        }
    }

    /// Run one scenario from a fresh form to its verified outcome
    pub async fn run_scenario(&mut self, scenario: Scenario) -> HarnessResult<()> {
        info!(%scenario, "scenario started");
        // Fixed before filling; the success notification must echo this exact date
        let date = self.meeting_date()?;

        self.open_form().await?;
        self.fill_valid_values(scenario.skip_field()).await?;
        if let Some((field, value)) = scenario.defect() {
            self.set_field(field, value).await?;
        }

        let outcome = scenario.expected_outcome(&date);
        if matches!(outcome, ExpectedOutcome::Success { .. }) {
            self.verify_date_value(&date).await?;
        }

        self.submit().await?;
        self.verify_outcome(&outcome).await?;
        info!(%scenario, "scenario passed");
        Ok(())
    }

    /// Unsupported city shows the delivery error
    pub async fn invalid_city(&mut self) -> HarnessResult<()> {
        self.run_scenario(Scenario::InvalidCity).await
    }

    /// Latin name shows the alphabet error
    pub async fn invalid_name(&mut self) -> HarnessResult<()> {
        self.run_scenario(Scenario::InvalidName).await
    }

    /// Short phone shows the phone error
    pub async fn invalid_phone(&mut self) -> HarnessResult<()> {
        self.run_scenario(Scenario::InvalidPhone).await
    }

    /// Unchecked agreement marks the checkbox invalid
    pub async fn reject_unchecked(&mut self) -> HarnessResult<()> {
        self.run_scenario(Scenario::RejectUnchecked).await
    }

    /// Fully valid form shows the booking notification
    pub async fn submit_form_successfully(&mut self) -> HarnessResult<()> {
        self.run_scenario(Scenario::SubmitFormSuccessfully).await
    }
}
