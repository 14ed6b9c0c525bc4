use crate::application::notifier::{Notifier, StatusNotice};
use crate::application::submission::SubmissionWorkflow;
use crate::application::synchronizer::{LocalView, RecordSynchronizer, SyncReport};
use crate::application::verification::{VerificationWorkflow, VerifyOutcome};
use crate::domain::{Record, TestSession};
use crate::foundation::{AccountAddress, ContractAddress, PollError, RecordId, Result};
use crate::infrastructure::compute::ConfidentialCompute;
use crate::infrastructure::config::PollConfig;
use crate::infrastructure::ledger::LedgerGateway;
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Facade exposed to the presentation layer: account connection, the
/// questionnaire session, the three workflows, and read-only snapshots.
pub struct PollService {
    ledger: Arc<dyn LedgerGateway>,
    synchronizer: Arc<RecordSynchronizer>,
    submission: SubmissionWorkflow,
    verification: VerificationWorkflow,
    notifier: Arc<Notifier>,
    contract: ContractAddress,
    account: Mutex<Option<AccountAddress>>,
    session: Mutex<TestSession>,
}

impl PollService {
    pub fn new(ledger: Arc<dyn LedgerGateway>, compute: Arc<dyn ConfidentialCompute>, config: &PollConfig) -> Self {
        let notifier = Arc::new(Notifier::new(&config.notify));
        let synchronizer = Arc::new(RecordSynchronizer::new(Arc::clone(&ledger), config.sync.max_concurrent_fetches));
        let submission = SubmissionWorkflow::new(
            Arc::clone(&ledger),
            Arc::clone(&compute),
            Arc::clone(&synchronizer),
            Arc::clone(&notifier),
            config.submit.id_alloc_max_attempts,
        );
        let verification = VerificationWorkflow::new(
            Arc::clone(&ledger),
            compute,
            Arc::clone(&synchronizer),
            Arc::clone(&notifier),
        );
        Self {
            ledger,
            synchronizer,
            submission,
            verification,
            notifier,
            contract: ContractAddress::from(config.service.contract_address.clone()),
            account: Mutex::new(None),
            session: Mutex::new(TestSession::new()),
        }
    }

    /// Connect an account and synchronize immediately, so the local view is
    /// never stale for longer than one round trip after connection.
    pub async fn connect(&self, account: AccountAddress) -> Result<SyncReport> {
        info!("account connected account={account}");
        *self.account.lock().await = Some(account);
        self.synchronize().await
    }

    pub async fn disconnect(&self) {
        *self.account.lock().await = None;
        self.session.lock().await.restart();
        self.notifier.clear();
    }

    pub async fn connected_account(&self) -> Option<AccountAddress> {
        self.account.lock().await.clone()
    }

    pub async fn synchronize(&self) -> Result<SyncReport> {
        let account = self.account.lock().await.clone();
        match self.synchronizer.synchronize(account.as_ref()).await {
            Ok(report) => Ok(report),
            Err(err) => {
                self.notifier.error(err.to_string());
                Err(err)
            }
        }
    }

    /// Select the option rank for the current question and advance.
    pub async fn select_answer(&self, rank: u32) -> Result<()> {
        self.session.lock().await.select_answer(rank)
    }

    pub async fn restart_session(&self) {
        self.session.lock().await.restart();
    }

    /// `(answered, expected, current_question)` for progress display.
    pub async fn session_progress(&self) -> (usize, usize, usize) {
        let session = self.session.lock().await;
        (session.answered_count(), crate::domain::question_count(), session.current_question())
    }

    /// Submit the completed session. The session resets only after success.
    pub async fn submit(&self) -> Result<Record> {
        let account = self.require_account().await?;
        let answers = {
            let session = self.session.lock().await;
            match session.completed_answers() {
                Ok(answers) => answers,
                Err(err) => {
                    self.notifier.error(err.to_string());
                    return Err(err);
                }
            }
        };
        let record = self.submission.submit(&answers, &account, &self.contract).await?;
        self.session.lock().await.restart();
        Ok(record)
    }

    pub async fn verify(&self, record_id: &RecordId) -> Result<VerifyOutcome> {
        let account = self.require_account().await?;
        self.verification.verify(record_id, &account, &self.contract).await
    }

    pub async fn check_availability(&self) -> Result<bool> {
        match self.ledger.is_service_available().await {
            Ok(true) => {
                self.notifier.success("Service availability check passed");
                Ok(true)
            }
            Ok(false) => {
                self.notifier.error("Ledger service unavailable");
                Err(PollError::ServiceUnavailable)
            }
            Err(err) => {
                self.notifier.error("Availability check failed");
                Err(err)
            }
        }
    }

    pub fn status(&self) -> Option<StatusNotice> {
        self.notifier.current()
    }

    pub async fn current_view(&self) -> LocalView {
        self.synchronizer.current_view().await
    }

    pub async fn records(&self) -> Vec<Record> {
        self.synchronizer.current_view().await.records
    }

    pub async fn my_records(&self) -> Vec<Record> {
        self.synchronizer.current_view().await.mine
    }

    pub async fn stats(&self) -> crate::domain::AggregateStats {
        self.synchronizer.current_view().await.stats
    }

    async fn require_account(&self) -> Result<AccountAddress> {
        match self.account.lock().await.clone() {
            Some(account) => Ok(account),
            None => {
                let err = PollError::NotConnected;
                self.notifier.error(err.to_string());
                Err(err)
            }
        }
    }
}
