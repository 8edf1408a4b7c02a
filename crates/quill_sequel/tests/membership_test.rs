//! Tests for series membership resolution.

mod test_utils;

use quill_core::{Story, StoryId};
use quill_interface::{CancellationToken, SeriesStore};
use quill_sequel::{SeriesMembershipManager, SeriesResolution};
use quill_store::{InMemorySeriesStore, InMemoryStoryStore};
use std::sync::Arc;
use test_utils::{RecordingSeriesStore, RecordingStoryStore, original, sequel};

struct Fixture {
    stories: Arc<RecordingStoryStore>,
    series: Arc<RecordingSeriesStore>,
}

impl Fixture {
    fn new(seed: Vec<Story>) -> Self {
        Self::with(seed, |s| s, |s| s)
    }

    fn with(
        seed: Vec<Story>,
        stories: impl FnOnce(RecordingStoryStore) -> RecordingStoryStore,
        series: impl FnOnce(RecordingSeriesStore) -> RecordingSeriesStore,
    ) -> Self {
        let table = InMemoryStoryStore::with_stories(seed);
        let series_store = InMemorySeriesStore::new(table.clone());
        Self {
            stories: Arc::new(stories(RecordingStoryStore::new(table))),
            series: Arc::new(series(RecordingSeriesStore::new(series_store))),
        }
    }

    fn manager(&self) -> SeriesMembershipManager {
        SeriesMembershipManager::new(self.stories.clone(), self.series.clone())
    }

    async fn members(&self, resolution: &SeriesResolution) -> Vec<(String, u32)> {
        let series_id = resolution.series_id().expect("series");
        self.series
            .get_series_with_stories(series_id)
            .await
            .unwrap()
            .entries
            .iter()
            .map(|e| (e.story.id().to_string(), e.position))
            .collect()
    }
}

#[tokio::test]
async fn test_standalone_story_joins_no_series() -> anyhow::Result<()> {
    let fixture = Fixture::new(vec![original("S1", "The Saga")]);
    let story = original("S1", "The Saga");

    let resolution = fixture.manager().resolve(&story, &CancellationToken::new()).await?;

    assert_eq!(resolution, SeriesResolution::None);
    assert_eq!(fixture.series.writes(), 0);
    Ok(())
}

#[tokio::test]
async fn test_existing_series_is_reused_without_writes() -> anyhow::Result<()> {
    let fixture = Fixture::new(vec![original("S1", "The Saga"), sequel("S2", "Two", "S1")]);
    let existing = fixture.series.inner().create_series("Saga", "").await?;
    fixture
        .series
        .inner()
        .add_story_to_series(&existing.id, &"S2".into(), Some(0))
        .await?;

    let resolution = fixture
        .manager()
        .resolve(&sequel("S2", "Two", "S1"), &CancellationToken::new())
        .await?;

    assert_eq!(resolution, SeriesResolution::Existing(existing.id));
    assert_eq!(fixture.series.writes(), 0);
    assert_eq!(fixture.series.inner().series_count().await, 1);
    Ok(())
}

#[tokio::test]
async fn test_chain_creates_series_with_root_and_original() -> anyhow::Result<()> {
    let fixture = Fixture::new(vec![
        original("S1", "The Saga"),
        sequel("S2", "Two", "S1"),
        sequel("S3", "Three", "S2"),
    ]);

    let resolution = fixture
        .manager()
        .resolve(&sequel("S3", "Three", "S2"), &CancellationToken::new())
        .await?;

    assert!(matches!(resolution, SeriesResolution::Created(_)));
    assert_eq!(fixture.series.creates(), 1);
    // Intermediate ancestors are not attached
    assert_eq!(
        fixture.members(&resolution).await,
        vec![("S1".to_string(), 0), ("S3".to_string(), 1)]
    );

    let series = fixture.series.inner().series_rows().await;
    assert_eq!(series[0].title, "The Saga Series");
    assert!(series[0].description.contains("The Saga"));
    Ok(())
}

#[tokio::test]
async fn test_sequel_without_parent_is_its_own_root() -> anyhow::Result<()> {
    let orphan = Story::builder()
        .id("S5")
        .title("Lonely Sequel")
        .is_sequel(true)
        .build()?;
    let fixture = Fixture::new(vec![orphan.clone()]);

    let resolution = fixture.manager().resolve(&orphan, &CancellationToken::new()).await?;

    assert_eq!(fixture.members(&resolution).await, vec![("S5".to_string(), 0)]);
    assert_eq!(fixture.series.adds(), 1);
    Ok(())
}

#[tokio::test]
async fn test_failed_ancestor_fetch_truncates_chain() -> anyhow::Result<()> {
    let fixture = Fixture::with(
        vec![
            original("S1", "The Saga"),
            sequel("S2", "Two", "S1"),
            sequel("S3", "Three", "S2"),
        ],
        |s| s.failing_read("S1"),
        |s| s,
    );

    let resolution = fixture
        .manager()
        .resolve(&sequel("S3", "Three", "S2"), &CancellationToken::new())
        .await?;

    assert_eq!(
        fixture.members(&resolution).await,
        vec![("S2".to_string(), 0), ("S3".to_string(), 1)]
    );
    assert_eq!(fixture.series.inner().series_rows().await[0].title, "Two Series");
    Ok(())
}

#[tokio::test]
async fn test_missing_parent_row_treats_original_as_root() -> anyhow::Result<()> {
    let fixture = Fixture::new(vec![sequel("S2", "Two", "deleted")]);

    let root = fixture
        .manager()
        .find_root(&sequel("S2", "Two", "deleted"), &CancellationToken::new())
        .await?;

    assert_eq!(root.id(), &StoryId::from("S2"));
    Ok(())
}

#[tokio::test]
async fn test_cyclic_chain_stops() -> anyhow::Result<()> {
    let fixture = Fixture::new(vec![sequel("A", "Ay", "B"), sequel("B", "Bee", "A")]);

    let root = fixture
        .manager()
        .find_root(&sequel("A", "Ay", "B"), &CancellationToken::new())
        .await?;

    assert_eq!(root.id(), &StoryId::from("B"));
    Ok(())
}

#[tokio::test]
async fn test_depth_limit_stops_walk() -> anyhow::Result<()> {
    let mut chain = vec![original("S0", "Root")];
    for i in 1..=5 {
        chain.push(sequel(&format!("S{}", i), &format!("Part {}", i), &format!("S{}", i - 1)));
    }
    let fixture = Fixture::new(chain);

    let root = fixture
        .manager()
        .with_max_ancestor_depth(2)
        .find_root(&sequel("S5", "Part 5", "S4"), &CancellationToken::new())
        .await?;

    assert_eq!(root.id(), &StoryId::from("S3"));
    assert_eq!(fixture.stories.reads(), 2);
    Ok(())
}

#[tokio::test]
async fn test_failed_series_lookup_counts_as_unlinked() -> anyhow::Result<()> {
    let fixture = Fixture::with(
        vec![original("S1", "The Saga"), sequel("S2", "Two", "S1")],
        |s| s,
        |s| s.failing_lookup(),
    );

    let standalone = fixture
        .manager()
        .resolve(&original("S1", "The Saga"), &CancellationToken::new())
        .await?;
    assert_eq!(standalone, SeriesResolution::None);

    let chained = fixture
        .manager()
        .resolve(&sequel("S2", "Two", "S1"), &CancellationToken::new())
        .await?;
    assert!(matches!(chained, SeriesResolution::Created(_)));
    Ok(())
}

#[tokio::test]
async fn test_attach_failure_leaves_partial_series() {
    let fixture = Fixture::with(
        vec![original("S1", "The Saga"), sequel("S2", "Two", "S1")],
        |s| s,
        |s| s.failing_add_after(1),
    );

    let result = fixture
        .manager()
        .resolve(&sequel("S2", "Two", "S1"), &CancellationToken::new())
        .await;

    assert!(result.is_err());
    assert_eq!(fixture.series.creates(), 1);
    assert_eq!(fixture.series.inner().memberships().await.len(), 1);
}

#[tokio::test]
async fn test_cancelled_token_prevents_writes() {
    let fixture = Fixture::new(vec![original("S1", "The Saga"), sequel("S2", "Two", "S1")]);
    let token = CancellationToken::new();
    token.cancel();

    let err = fixture
        .manager()
        .resolve(&sequel("S2", "Two", "S1"), &token)
        .await
        .unwrap_err();

    assert!(err.is_cancellation());
    assert_eq!(fixture.series.writes(), 0);
}
