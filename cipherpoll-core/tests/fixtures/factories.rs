#![allow(dead_code)]

use crate::fixtures::{TEST_ACCOUNT, TEST_CONTRACT};
use cipherpoll_core::application::PollService;
use cipherpoll_core::domain::Record;
use cipherpoll_core::foundation::AccountAddress;
use cipherpoll_core::infrastructure::compute::InMemoryCompute;
use cipherpoll_core::infrastructure::config::PollConfig;
use cipherpoll_core::infrastructure::ledger::InMemoryLedger;
use std::sync::Arc;

pub fn test_config() -> PollConfig {
    let mut config = PollConfig::default();
    config.service.contract_address = TEST_CONTRACT.to_string();
    config
}

pub fn test_service() -> (Arc<InMemoryLedger>, Arc<InMemoryCompute>, PollService) {
    let ledger = Arc::new(InMemoryLedger::new());
    let compute = Arc::new(InMemoryCompute::new());
    let service = PollService::new(ledger.clone(), compute.clone(), &test_config());
    (ledger, compute, service)
}

pub fn test_account() -> AccountAddress {
    AccountAddress::from(TEST_ACCOUNT)
}

/// Connect the test account and submit one full questionnaire.
pub async fn connect_and_submit(service: &PollService, answers: &[u32]) -> Record {
    service.connect(test_account()).await.expect("connect");
    for rank in answers {
        service.select_answer(*rank).await.expect("answer");
    }
    service.submit().await.expect("submit")
}
