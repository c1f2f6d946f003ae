//! Startup detail loading.
//!
//! The detail page needs two independent documents: the startup itself and
//! the editor's picks playlist. [`DetailLoader::load`] issues both lookups
//! through the render pass before awaiting either, then awaits the startup
//! first. A missing startup ends the load as [`DetailOutcome::NotFound`]
//! without consulting the playlist.

use pitchboard_core::Result;
use pitchboard_core::types::{DocumentId, Startup, StartupCard};
use strum::{AsRefStr, Display};

use super::render::{RenderPass, TRACING_TARGET};

/// Progress of a single detail load.
///
/// `NotStarted → BothIssued → PrimaryResolved → SecondaryResolved → Rendered`,
/// or `NotFound` after `BothIssued`, or `Failed` from any await point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum DetailState {
    #[default]
    NotStarted,
    BothIssued,
    PrimaryResolved,
    SecondaryResolved,
    Rendered,
    NotFound,
    Failed,
}

impl DetailState {
    /// Returns `true` for `Rendered`, `NotFound` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rendered | Self::NotFound | Self::Failed)
    }
}

/// Everything the detail page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub startup: Startup,
    /// Editor's picks, empty when the playlist is absent or unset.
    pub editor_picks: Vec<StartupCard>,
}

/// Result of a detail load that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Found(Box<DetailView>),
    NotFound,
}

/// Loads one detail view within a render pass.
#[derive(Debug)]
pub struct DetailLoader<'a> {
    pass: &'a RenderPass,
    editor_picks_slug: &'a str,
    state: DetailState,
}

impl<'a> DetailLoader<'a> {
    pub fn new(pass: &'a RenderPass, editor_picks_slug: &'a str) -> Self {
        Self {
            pass,
            editor_picks_slug,
            state: DetailState::NotStarted,
        }
    }

    /// Current state of the load.
    #[inline]
    pub fn state(&self) -> DetailState {
        self.state
    }

    /// Loads the startup `id` together with the editor's picks.
    ///
    /// A blank `id` fails with `missing_identifier` before anything is
    /// requested. Failures of either lookup are returned as-is.
    pub async fn load(&mut self, id: &str) -> Result<DetailOutcome> {
        let result = self.run(id).await;
        if result.is_err() {
            self.transition(DetailState::Failed);
        }

        result
    }

    async fn run(&mut self, id: &str) -> Result<DetailOutcome> {
        let id = DocumentId::new(id)?;

        let primary = self.pass.startup(&id);
        let secondary = self.pass.playlist(self.editor_picks_slug);
        self.transition(DetailState::BothIssued);

        let Some(startup) = Option::clone(&*primary.await?) else {
            self.transition(DetailState::NotFound);
            return Ok(DetailOutcome::NotFound);
        };
        self.transition(DetailState::PrimaryResolved);

        let editor_picks = Option::clone(&*secondary.await?)
            .map(|playlist| playlist.into_selection())
            .unwrap_or_default();
        self.transition(DetailState::SecondaryResolved);

        let view = DetailView {
            startup,
            editor_picks,
        };
        self.transition(DetailState::Rendered);

        Ok(DetailOutcome::Found(Box::new(view)))
    }

    fn transition(&mut self, next: DetailState) {
        tracing::debug!(
            target: TRACING_TARGET,
            pass_id = %self.pass.id(),
            from = %self.state,
            to = %next,
            "Detail load state changed"
        );

        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pitchboard_core::ErrorKind;
    use pitchboard_core::mock::{MockProvider, MockResponse};
    use pitchboard_core::query::ContentQuery;
    use serde_json::{Value, json};
    use tokio::time::Instant;

    use super::*;

    const PICKS: &str = "startup-of-the-day";

    fn startup_json(id: &str, title: &str) -> Value {
        json!({
            "_id": id,
            "_createdAt": "2024-01-05T10:00:00Z",
            "title": title,
            "pitch": "An app for mechanics",
        })
    }

    fn primary(id: &str) -> ContentQuery {
        ContentQuery::startup_by_id(&DocumentId::new(id).unwrap())
    }

    fn secondary() -> ContentQuery {
        ContentQuery::playlist_by_slug(PICKS)
    }

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn picks_json() -> Value {
        json!({
            "_id": "playlist-1",
            "select": [startup_json("post2", "Second"), startup_json("post3", "Third")],
        })
    }

    #[tokio::test(start_paused = true)]
    async fn loads_startup_and_picks_concurrently() {
        let provider = MockProvider::new()
            .with_response(
                primary("abc"),
                MockResponse::value(startup_json("abc", "Mechanic")).with_delay(millis(50)),
            )
            .with_response(
                secondary(),
                MockResponse::value(picks_json()).with_delay(millis(30)),
            );
        let pass = RenderPass::new(provider.clone().into_service());
        let mut loader = DetailLoader::new(&pass, PICKS);

        let started_at = Instant::now();
        let outcome = loader.load("abc").await.unwrap();
        let elapsed = started_at.elapsed();

        let DetailOutcome::Found(view) = outcome else {
            panic!("expected a startup");
        };
        assert_eq!(view.startup.card.title.as_deref(), Some("Mechanic"));
        let picks: Vec<&str> = view.editor_picks.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(picks, ["post2", "post3"]);

        assert!(elapsed >= millis(50) && elapsed < millis(60), "{elapsed:?}");
        assert_eq!(loader.state(), DetailState::Rendered);
    }

    #[tokio::test(start_paused = true)]
    async fn overlaps_independent_lookups() {
        let provider = MockProvider::new()
            .with_response(
                primary("abc"),
                MockResponse::value(startup_json("abc", "Mechanic")).with_delay(millis(100)),
            )
            .with_response(
                secondary(),
                MockResponse::value(picks_json()).with_delay(millis(100)),
            );
        let pass = RenderPass::new(provider.into_service());

        let started_at = Instant::now();
        DetailLoader::new(&pass, PICKS).load("abc").await.unwrap();

        assert!(started_at.elapsed() < millis(150));
    }

    #[tokio::test]
    async fn issues_primary_before_secondary() {
        let provider = MockProvider::new();
        let pass = RenderPass::new(provider.clone().into_service());

        DetailLoader::new(&pass, PICKS).load("abc").await.unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], primary("abc").cache_key());
        assert_eq!(calls[1], secondary().cache_key());
    }

    #[tokio::test]
    async fn missing_startup_is_not_found() {
        let provider = MockProvider::new()
            .with_response(primary("missing"), MockResponse::null())
            .with_response(secondary(), MockResponse::value(picks_json()));
        let pass = RenderPass::new(provider.into_service());
        let mut loader = DetailLoader::new(&pass, PICKS);

        let outcome = loader.load("missing").await.unwrap();

        assert_eq!(outcome, DetailOutcome::NotFound);
        assert_eq!(loader.state(), DetailState::NotFound);
        assert!(pass.playlists().contains(&PICKS.to_owned()));
    }

    #[tokio::test(start_paused = true)]
    async fn unawaited_picks_settle_after_not_found() {
        let provider = MockProvider::new()
            .with_response(primary("missing"), MockResponse::null())
            .with_response(
                secondary(),
                MockResponse::value(picks_json()).with_delay(millis(50)),
            );
        let pass = RenderPass::new(provider.into_service());

        let outcome = DetailLoader::new(&pass, PICKS).load("missing").await.unwrap();
        assert_eq!(outcome, DetailOutcome::NotFound);

        tokio::time::sleep(millis(100)).await;
        assert!(pass.playlists().is_settled(&PICKS.to_owned()));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_startup_ignores_failing_picks() {
        let provider = MockProvider::new()
            .with_response(primary("missing"), MockResponse::null().with_delay(millis(10)))
            .with_response(secondary(), MockResponse::failure(ErrorKind::RemoteFailure));
        let pass = RenderPass::new(provider.into_service());

        let outcome = DetailLoader::new(&pass, PICKS).load("missing").await.unwrap();
        assert_eq!(outcome, DetailOutcome::NotFound);
    }

    #[tokio::test]
    async fn blank_id_fails_without_lookups() {
        let provider = MockProvider::new();
        let pass = RenderPass::new(provider.clone().into_service());
        let mut loader = DetailLoader::new(&pass, PICKS);

        let error = loader.load("").await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::MissingIdentifier);
        assert_eq!(loader.state(), DetailState::Failed);
        assert!(provider.calls().is_empty());
        assert!(pass.startups().is_empty());
        assert!(pass.playlists().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn primary_failure_propagates() {
        let provider = MockProvider::new()
            .with_response(
                primary("abc"),
                MockResponse::failure(ErrorKind::RemoteFailure).with_delay(millis(20)),
            )
            .with_response(secondary(), MockResponse::value(picks_json()));
        let pass = RenderPass::new(provider.into_service());
        let mut loader = DetailLoader::new(&pass, PICKS);

        let error = loader.load("abc").await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::RemoteFailure);
        assert_eq!(loader.state(), DetailState::Failed);
    }

    #[tokio::test]
    async fn secondary_failure_propagates() {
        let provider = MockProvider::new()
            .with_response(primary("abc"), MockResponse::value(startup_json("abc", "Mechanic")))
            .with_response(secondary(), MockResponse::failure(ErrorKind::Timeout));
        let pass = RenderPass::new(provider.into_service());
        let mut loader = DetailLoader::new(&pass, PICKS);

        let error = loader.load("abc").await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::Timeout);
        assert_eq!(loader.state(), DetailState::Failed);
    }

    #[tokio::test]
    async fn absent_playlist_is_empty_selection() {
        let provider = MockProvider::new()
            .with_response(primary("abc"), MockResponse::value(startup_json("abc", "Mechanic")))
            .with_response(secondary(), MockResponse::null());
        let pass = RenderPass::new(provider.into_service());

        let outcome = DetailLoader::new(&pass, PICKS).load("abc").await.unwrap();

        let DetailOutcome::Found(view) = outcome else {
            panic!("expected a startup");
        };
        assert!(view.editor_picks.is_empty());
    }

    #[tokio::test]
    async fn repeated_loads_reuse_lookups() {
        let provider = MockProvider::new()
            .with_response(primary("abc"), MockResponse::value(startup_json("abc", "Mechanic")));
        let pass = RenderPass::new(provider.clone().into_service());

        let first = DetailLoader::new(&pass, PICKS).load("abc").await.unwrap();
        let second = DetailLoader::new(&pass, PICKS).load("abc").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.call_count("startup_by_id"), 1);
        assert_eq!(provider.call_count("playlist_by_slug"), 1);
    }
}
