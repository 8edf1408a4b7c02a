use chrono::Utc;
use quill_core::{
    Character, OutlineBeat, PlotOutline, Series, SeriesEntry, SeriesWithStories, Story,
    StoryDraft, StoryId, StoryUpdate,
};

fn root_story() -> Story {
    Story::builder()
        .id("S1")
        .title("The Lighthouse")
        .story_idea("A keeper finds a message in the lamp.")
        .build()
        .unwrap()
}

#[test]
fn test_original_story_has_no_sequel_markers() {
    let story = root_story();
    assert!(!story.is_sequel_or_child());
    assert!(story.parent_story_id().is_none());
}

#[test]
fn test_parent_link_alone_marks_a_chain() {
    let story = Story::builder()
        .id("S2")
        .title("Orphaned Link")
        .parent_story_id("S1")
        .build()
        .unwrap();
    assert!(!*story.is_sequel());
    assert!(story.is_sequel_or_child());
}

#[test]
fn test_sequel_draft_links_parent() {
    let parent = root_story();
    let outline = PlotOutline::new(vec![OutlineBeat::new("Return", "The keeper comes back.")]);
    let draft = StoryDraft::sequel_of(&parent, "The Lamp Relit", "idea", outline.clone(), vec![]);

    assert!(draft.is_sequel);
    assert_eq!(draft.parent_story_id, Some(StoryId::from("S1")));

    let saved = Story::from_draft(StoryId::from("S9"), draft, Utc::now());
    assert_eq!(saved.id().as_str(), "S9");
    assert_eq!(saved.plot_outline(), &outline);
    assert!(saved.created_at().is_some());
}

#[test]
fn test_apply_partial_update() {
    let updated = root_story().apply(
        StoryUpdate::new()
            .with_title("The Lighthouse, Revised")
            .with_characters(vec![Character::new("Mara", "keeper", "")]),
    );
    assert_eq!(updated.title(), "The Lighthouse, Revised");
    assert_eq!(updated.story_idea(), "A keeper finds a message in the lamp.");
    assert_eq!(updated.characters().len(), 1);
    assert!(StoryUpdate::new().is_empty());
}

#[test]
fn test_outline_parses_model_aliases() {
    let outline =
        PlotOutline::from_serialized(r#"[{"name":"Storm","summary":"The lamp fails."}]"#).unwrap();
    assert_eq!(outline.beats()[0].title, "Storm");
    assert_eq!(outline.beats()[0].description, "The lamp fails.");
    assert_eq!(outline.to_plain_text(), "1. Storm: The lamp fails.");
}

#[test]
fn test_malformed_outline_is_an_error() {
    assert!(PlotOutline::from_serialized("not json").is_err());
}

#[test]
fn test_character_list_round_trip_through_text_column() {
    let characters = vec![Character::new("Mara", "keeper", "Stubborn")];
    let text = Character::serialize_list(&characters).unwrap();
    assert_eq!(Character::parse_list(&text).unwrap(), characters);
    assert!(Character::parse_list("  ").unwrap().is_empty());
}

fn saga_with_positions(positions: &[u32]) -> SeriesWithStories {
    let series = Series {
        id: "X".into(),
        title: "Saga Series".to_string(),
        description: String::new(),
        created_at: Utc::now(),
    };
    let entries = positions
        .iter()
        .map(|&position| SeriesEntry {
            position,
            story: root_story(),
        })
        .collect();
    SeriesWithStories::new(series, entries)
}

#[test]
fn test_next_position_follows_highest_member() {
    assert_eq!(saga_with_positions(&[]).next_position(), Some(0));
    assert_eq!(saga_with_positions(&[0, 9, 2]).next_position(), Some(10));
}

#[test]
fn test_next_position_is_none_at_the_last_position() {
    assert_eq!(saga_with_positions(&[3, u32::MAX]).next_position(), None);
}
