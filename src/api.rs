use crate::alliance::{aggregate, AggregationReport};
use crate::config::EngineConfig;
use crate::error::{ScoutError, ScoutResult};
use crate::model::RawMatchRecord;
use crate::predictor::{predict, HistoryIndex, MatchupProjection};
use crate::stats::{build_team_aggregates, leaderboard, LeaderboardEntry, LeaderboardMetric};
use crate::store::RecordSource;
use tracing::info;

struct Snapshot {
    report: AggregationReport,
    history: HistoryIndex,
}

/// Holds the latest computed snapshot for one event.
///
/// Nothing refreshes on its own: callers decide when to `refresh` and when to
/// `invalidate`. Every refresh recomputes from scratch.
pub struct ScoutingSession {
    pub config: EngineConfig,
    snapshot: Option<Snapshot>,
}

impl ScoutingSession {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            snapshot: None,
        }
    }

    pub fn refresh(&mut self, source: &dyn RecordSource) -> ScoutResult<&AggregationReport> {
        let records = source.fetch()?;
        Ok(self.refresh_with(&records))
    }

    pub fn refresh_with(&mut self, records: &[RawMatchRecord]) -> &AggregationReport {
        let report = aggregate(records, &self.config.bonus);
        let history = build_team_aggregates(&report.records);

        info!(
            "Refreshed: {} scored, {} rejected, {} teams",
            report.records.len(),
            report.rejected.len(),
            history.len()
        );

        let snapshot = self.snapshot.insert(Snapshot { report, history });
        &snapshot.report
    }

    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    fn snapshot(&self) -> ScoutResult<&Snapshot> {
        self.snapshot.as_ref().ok_or(ScoutError::NotLoaded)
    }

    pub fn report(&self) -> ScoutResult<&AggregationReport> {
        Ok(&self.snapshot()?.report)
    }

    pub fn aggregates(&self) -> ScoutResult<&HistoryIndex> {
        Ok(&self.snapshot()?.history)
    }

    pub fn leaderboard(&self, metric: LeaderboardMetric) -> ScoutResult<Vec<LeaderboardEntry>> {
        Ok(leaderboard(self.aggregates()?, metric))
    }

    pub fn predict(&self, red: &[u32], blue: &[u32]) -> ScoutResult<MatchupProjection> {
        predict(red, blue, self.aggregates()?, &self.config)
    }
}
