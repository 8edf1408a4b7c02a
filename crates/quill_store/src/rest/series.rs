//! REST-backed series store.

use super::client::{RestClient, eq, in_list};
use super::rows::{
    MembershipRow, NewSeriesRow, PositionPatch, SeriesPatch, SeriesRow, StoryRow,
};
use async_trait::async_trait;
use quill_core::{
    next_free_position, Series, SeriesEntry, SeriesId, SeriesMembership, SeriesUpdate,
    SeriesWithStories, Story, StoryId,
};
use quill_error::{QuillResult, StoreError, StoreErrorKind};
use quill_interface::SeriesStore;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

const SERIES: &str = "series";
const MEMBERSHIPS: &str = "series_stories";

/// Series store over the hosted `series` and `series_stories` tables.
///
/// The backend enforces `(series_id, story_id)` uniqueness; a duplicate
/// insert comes back as a 409 and surfaces as `StoreErrorKind::Conflict`.
#[derive(Debug, Clone)]
pub struct RestSeriesStore {
    client: RestClient,
}

impl RestSeriesStore {
    /// Create a store sharing `client`.
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    async fn require_series(&self, series_id: &SeriesId) -> QuillResult<Series> {
        let rows: Vec<SeriesRow> = self
            .client
            .select(SERIES, &[("id", eq(series_id)), ("limit", "1".to_string())])
            .await?;
        rows.into_iter().next().map(Series::from).ok_or_else(|| {
            StoreError::new(StoreErrorKind::NotFound(format!("series {}", series_id))).into()
        })
    }

    async fn members(&self, series_id: &SeriesId) -> QuillResult<Vec<MembershipRow>> {
        self.client
            .select(
                MEMBERSHIPS,
                &[
                    ("series_id", eq(series_id)),
                    ("order", "position.asc".to_string()),
                ],
            )
            .await
    }
}

#[async_trait]
impl SeriesStore for RestSeriesStore {
    #[instrument(skip(self), fields(story_id = %story_id))]
    async fn get_series_for_story(&self, story_id: &StoryId) -> QuillResult<Option<Series>> {
        let links: Vec<MembershipRow> = self
            .client
            .select(MEMBERSHIPS, &[("story_id", eq(story_id))])
            .await?;
        if links.is_empty() {
            return Ok(None);
        }

        let rows: Vec<SeriesRow> = self
            .client
            .select(
                SERIES,
                &[
                    ("id", in_list(links.iter().map(|l| &l.series_id))),
                    ("order", "created_at.asc".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next().map(Series::from))
    }

    #[instrument(skip(self, description), fields(title = %title))]
    async fn create_series(&self, title: &str, description: &str) -> QuillResult<Series> {
        let rows: Vec<SeriesRow> = self
            .client
            .insert(SERIES, &NewSeriesRow { title, description })
            .await?;
        let series = rows.into_iter().next().map(Series::from).ok_or_else(|| {
            StoreError::new(StoreErrorKind::Decode(
                "insert returned no series row".to_string(),
            ))
        })?;
        debug!(series_id = %series.id, "Created series");
        Ok(series)
    }

    #[instrument(skip(self), fields(series_id = %series_id, story_id = %story_id, ?position))]
    async fn add_story_to_series(
        &self,
        series_id: &SeriesId,
        story_id: &StoryId,
        position: Option<u32>,
    ) -> QuillResult<SeriesMembership> {
        let position = match position {
            Some(position) => position,
            None => {
                self.require_series(series_id).await?;
                let members = self.members(series_id).await?;
                next_free_position(members.iter().map(|m| m.position)).ok_or_else(|| {
                    StoreError::new(StoreErrorKind::Conflict(format!(
                        "series {} has no position free after {}",
                        series_id,
                        u32::MAX
                    )))
                })?
            }
        };

        let row = MembershipRow {
            series_id: series_id.to_string(),
            story_id: story_id.to_string(),
            position,
        };
        let rows: Vec<MembershipRow> = self.client.insert(MEMBERSHIPS, &row).await?;
        Ok(rows.into_iter().next().unwrap_or(row).into())
    }

    #[instrument(skip(self), fields(series_id = %series_id))]
    async fn get_series_with_stories(
        &self,
        series_id: &SeriesId,
    ) -> QuillResult<SeriesWithStories> {
        let series = self.require_series(series_id).await?;
        let members = self.members(series_id).await?;
        if members.is_empty() {
            return Ok(SeriesWithStories::new(series, Vec::new()));
        }

        let rows: Vec<StoryRow> = self
            .client
            .select(
                "stories",
                &[("id", in_list(members.iter().map(|m| &m.story_id)))],
            )
            .await?;
        let mut stories: HashMap<String, Story> = HashMap::with_capacity(rows.len());
        for row in rows {
            let id = row.id.clone();
            stories.insert(id, row.into_story()?);
        }

        let entries = members
            .into_iter()
            .filter_map(|member| match stories.remove(&member.story_id) {
                Some(story) => Some(SeriesEntry {
                    position: member.position,
                    story,
                }),
                None => {
                    warn!(story_id = %member.story_id, "Series member has no story row");
                    None
                }
            })
            .collect();
        Ok(SeriesWithStories::new(series, entries))
    }

    async fn list_series(&self) -> QuillResult<Vec<Series>> {
        let rows: Vec<SeriesRow> = self
            .client
            .select(SERIES, &[("order", "created_at.asc".to_string())])
            .await?;
        Ok(rows.into_iter().map(Series::from).collect())
    }

    #[instrument(skip(self, update), fields(series_id = %series_id))]
    async fn update_series(
        &self,
        series_id: &SeriesId,
        update: &SeriesUpdate,
    ) -> QuillResult<Series> {
        if update.title.is_none() && update.description.is_none() {
            return self.require_series(series_id).await;
        }

        let patch = SeriesPatch {
            title: update.title.as_deref(),
            description: update.description.as_deref(),
        };
        let rows: Vec<SeriesRow> = self
            .client
            .patch(SERIES, &[("id", eq(series_id))], &patch)
            .await?;
        rows.into_iter().next().map(Series::from).ok_or_else(|| {
            StoreError::new(StoreErrorKind::NotFound(format!("series {}", series_id))).into()
        })
    }

    #[instrument(skip(self), fields(series_id = %series_id))]
    async fn delete_series(&self, series_id: &SeriesId) -> QuillResult<()> {
        self.require_series(series_id).await?;
        self.client
            .delete(MEMBERSHIPS, &[("series_id", eq(series_id))])
            .await?;
        self.client.delete(SERIES, &[("id", eq(series_id))]).await?;
        debug!("Deleted series and its memberships");
        Ok(())
    }

    #[instrument(skip(self), fields(series_id = %series_id, story_id = %story_id))]
    async fn remove_story_from_series(
        &self,
        series_id: &SeriesId,
        story_id: &StoryId,
    ) -> QuillResult<()> {
        self.client
            .delete(
                MEMBERSHIPS,
                &[("series_id", eq(series_id)), ("story_id", eq(story_id))],
            )
            .await
    }

    #[instrument(skip(self, ordered), fields(series_id = %series_id, count = ordered.len()))]
    async fn reorder_series(&self, series_id: &SeriesId, ordered: &[StoryId]) -> QuillResult<()> {
        self.require_series(series_id).await?;
        let members = self.members(series_id).await?;

        if let Some(missing) = ordered
            .iter()
            .find(|id| !members.iter().any(|m| m.story_id == id.as_str()))
        {
            return Err(StoreError::new(StoreErrorKind::NotFound(format!(
                "story {} is not in series {}",
                missing, series_id
            )))
            .into());
        }

        // Listed stories first, then the rest in their current order.
        let unlisted = members
            .iter()
            .filter(|m| !ordered.iter().any(|id| id.as_str() == m.story_id))
            .map(|m| m.story_id.as_str());
        let sequence: Vec<&str> = ordered.iter().map(StoryId::as_str).chain(unlisted).collect();

        for (position, story_id) in sequence.into_iter().enumerate() {
            let _: Vec<MembershipRow> = self
                .client
                .patch(
                    MEMBERSHIPS,
                    &[("series_id", eq(series_id)), ("story_id", eq(story_id))],
                    &PositionPatch {
                        position: position as u32,
                    },
                )
                .await?;
        }
        Ok(())
    }
}
