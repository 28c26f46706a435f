//! grpc-journal — gRPC adapter for journal lookup.
//!
//! Exposes `journal.v1.JournalLookup/GetJournal` in front of a
//! [`JournalService`]. The adapter only translates fields between the wire
//! message and the domain record:
//!
//! ```text
//! gRPC request → JournalLookupService → JournalService → JournalRepository
//! ```
//!
//! Domain errors are not mapped to specific status codes; every failure
//! (not found, storage error) reaches the caller as `Code::Unknown` carrying
//! the error text.

use std::sync::Arc;

use domain::service::JournalService;
use domain::{CoreError, Journal, JournalRepository};
use tonic::{Request, Response, Status};
use tracing::debug;

/// Generated protobuf types and service stubs.
pub mod pb {
    tonic::include_proto!("journal.v1");

    /// File descriptor set for gRPC reflection.
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("journal_descriptor");
}

pub use pb::journal_lookup_client::JournalLookupClient;
pub use pb::journal_lookup_server::{JournalLookup, JournalLookupServer};
pub use pb::FILE_DESCRIPTOR_SET;

impl From<Journal> for pb::Journal {
    fn from(journal: Journal) -> Self {
        Self {
            id: journal.id,
            name: journal.name,
            description: journal.description.unwrap_or_default(),
            impact_factor: journal.impact_factor,
        }
    }
}

impl From<pb::Journal> for Journal {
    fn from(msg: pb::Journal) -> Self {
        Self {
            id: msg.id,
            name: msg.name,
            description: Some(msg.description).filter(|d| !d.is_empty()),
            impact_factor: msg.impact_factor,
        }
    }
}

/// Pass a domain error through to the transport without classifying it.
pub fn passthrough_status(err: CoreError) -> Status {
    Status::unknown(err.to_string())
}

/// `JournalLookup` implementation backed by a shared journal service.
pub struct JournalLookupService<R: JournalRepository> {
    service: Arc<JournalService<R>>,
}

impl<R: JournalRepository + 'static> JournalLookupService<R> {
    pub fn new(service: Arc<JournalService<R>>) -> Self {
        Self { service }
    }

    /// Wrap into the tonic server type ready for `Server::add_service`.
    pub fn into_server(self) -> JournalLookupServer<Self> {
        JournalLookupServer::new(self)
    }
}

#[tonic::async_trait]
impl<R: JournalRepository + 'static> JournalLookup for JournalLookupService<R> {
    async fn get_journal(
        &self,
        request: Request<pb::GetJournalRequest>,
    ) -> Result<Response<pb::GetJournalResponse>, Status> {
        let req = request.into_inner();
        debug!(journal_id = %req.id, "GetJournal");

        let journal = self
            .service
            .get_journal(&req.id)
            .await
            .map_err(passthrough_status)?;

        Ok(Response::new(pb::GetJournalResponse {
            journal: Some(journal.into()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::adapters::memory_repo::InMemoryJournalRepo;
    use tonic::Code;

    async fn seeded() -> JournalLookupService<InMemoryJournalRepo> {
        let service = JournalService::new(InMemoryJournalRepo::new());
        service
            .create_journal(Journal::new("journal_1", "Nature", 64.8))
            .await
            .unwrap();
        JournalLookupService::new(Arc::new(service))
    }

    #[tokio::test]
    async fn get_journal_translates_fields() {
        let svc = seeded().await;
        let resp = svc
            .get_journal(Request::new(pb::GetJournalRequest {
                id: "journal_1".into(),
            }))
            .await
            .unwrap()
            .into_inner();

        let journal = resp.journal.expect("journal present");
        assert_eq!(journal.id, "journal_1");
        assert_eq!(journal.name, "Nature");
        assert_eq!(journal.description, "");
        assert_eq!(journal.impact_factor, 64.8);
    }

    #[tokio::test]
    async fn missing_journal_is_unknown_status() {
        let svc = seeded().await;
        let status = svc
            .get_journal(Request::new(pb::GetJournalRequest {
                id: "missing".into(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Unknown);
        assert_eq!(status.message(), "journal with id 'missing' not found");
    }

    #[test]
    fn empty_description_maps_back_to_none() {
        let domain_journal: Journal = pb::Journal {
            id: "j".into(),
            name: "Science".into(),
            description: String::new(),
            impact_factor: 1.5,
        }
        .into();
        assert!(domain_journal.description.is_none());

        let wire: pb::Journal = Journal::new("j", "Science", 1.5)
            .with_description("weekly")
            .into();
        assert_eq!(wire.description, "weekly");
    }

    #[test]
    fn storage_and_lookup_failures_look_the_same() {
        let a = passthrough_status(CoreError::persistence("get journal by id", "timeout"));
        let b = passthrough_status(CoreError::not_found(domain::EntityKind::Journal, "id", "x"));
        assert_eq!(a.code(), b.code());
    }
}
