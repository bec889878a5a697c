//! Batch import orchestration.
//!
//! Rows are processed strictly in order, each as its own write. A row that
//! fails to convert, validate or persist is counted, described in the
//! summary, and handed to the [`ErrorRecorder`]; the batch carries on.

pub mod inputs;
pub mod recorder;
pub mod row;

use arena_core::import::{EntityKind, ImportSummary};
use arena_db::store::{ImportErrorStore, RecordStore};

use crate::service::RecordService;
use inputs::{
    DisciplineImport, GamePlayerStatImport, ImportRow, MatchGameImport, MatchImport, PlayerImport,
    SquadMemberImport, TeamImport, TeamProfileImport, TournamentImport,
    TournamentRegistrationImport,
};
pub use recorder::ErrorRecorder;
pub use row::{parse_csv_rows, parse_json_rows, RawRow};

pub struct Importer<S, E> {
    service: RecordService<S>,
    recorder: ErrorRecorder<E>,
}

impl<S: RecordStore, E: ImportErrorStore> Importer<S, E> {
    pub fn new(store: S, errors: E) -> Self {
        Self {
            service: RecordService::new(store),
            recorder: ErrorRecorder::new(errors),
        }
    }

    /// Import `rows` as entity `T`. Never fails; problems land in the summary.
    ///
    /// `source` is provenance only and is stored with each audit record.
    pub async fn import<T: ImportRow>(&self, source: &str, rows: &[RawRow]) -> ImportSummary {
        let kind = T::KIND;
        let mut summary = ImportSummary::default();

        for (idx, raw) in rows.iter().enumerate() {
            let outcome = match raw.decode::<T>().and_then(T::into_record) {
                Ok(mut record) => self.service.create(&mut record).await,
                Err(e) => Err(e.into()),
            };

            match outcome {
                Ok(()) => summary.record_success(),
                Err(e) => {
                    tracing::warn!(
                        kind = %kind,
                        source,
                        row = idx + 1,
                        failure = %e.kind(),
                        error = %e,
                        "Import row failed",
                    );
                    self.recorder.record(source, raw, &e).await;
                    summary.record_failure(&e);
                }
            }
        }

        tracing::info!(
            kind = %kind,
            source,
            inserted = summary.inserted,
            failed = summary.failed,
            "Import batch finished",
        );
        summary
    }

    /// Same as [`Importer::import`] with the row type picked at runtime.
    pub async fn import_kind(
        &self,
        kind: EntityKind,
        source: &str,
        rows: &[RawRow],
    ) -> ImportSummary {
        match kind {
            EntityKind::Players => self.import::<PlayerImport>(source, rows).await,
            EntityKind::Disciplines => self.import::<DisciplineImport>(source, rows).await,
            EntityKind::Teams => self.import::<TeamImport>(source, rows).await,
            EntityKind::Tournaments => self.import::<TournamentImport>(source, rows).await,
            EntityKind::TournamentRegistrations => {
                self.import::<TournamentRegistrationImport>(source, rows).await
            }
            EntityKind::Matches => self.import::<MatchImport>(source, rows).await,
            EntityKind::MatchGames => self.import::<MatchGameImport>(source, rows).await,
            EntityKind::GamePlayerStats => self.import::<GamePlayerStatImport>(source, rows).await,
            EntityKind::SquadMembers => self.import::<SquadMemberImport>(source, rows).await,
            EntityKind::TeamProfiles => self.import::<TeamProfileImport>(source, rows).await,
        }
    }
}
