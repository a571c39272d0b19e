//! The fixed enumeration of tracked ministry activities and the count
//! containers keyed by it.
//!
//! Each category holds an ordered sequence of per-period counts (one
//! entry per reporting unit, typically a week of the month). The wire
//! key of a category doubles as its storage column name, so the whole
//! request/entity/row mapping runs as one loop over [`Category::ALL`]
//! instead of twenty-odd near-identical field copies.

use std::collections::BTreeMap;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::average::category_average;

/// One named kind of tracked ministry activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    WorshipService,
    SundaySchool,
    PrayerMeetings,
    BibleStudies,
    MensFellowships,
    WomensFellowships,
    YouthFellowships,
    ChildFellowships,
    Outreach,
    TrainingOrSeminars,
    LeadershipConferences,
    LeadershipTraining,
    Others,
    FamilyDays,
    TithesAndOfferings,
    HomeVisited,
    BibleStudyOrGroupLed,
    SermonOrMessagePreached,
    PersonNewlyContacted,
    PersonFollowedUp,
    PersonLedToChrist,
}

impl Category {
    /// Every category in canonical order. This order is also the column
    /// order used by the store.
    pub const ALL: [Category; 21] = [
        Category::WorshipService,
        Category::SundaySchool,
        Category::PrayerMeetings,
        Category::BibleStudies,
        Category::MensFellowships,
        Category::WomensFellowships,
        Category::YouthFellowships,
        Category::ChildFellowships,
        Category::Outreach,
        Category::TrainingOrSeminars,
        Category::LeadershipConferences,
        Category::LeadershipTraining,
        Category::Others,
        Category::FamilyDays,
        Category::TithesAndOfferings,
        Category::HomeVisited,
        Category::BibleStudyOrGroupLed,
        Category::SermonOrMessagePreached,
        Category::PersonNewlyContacted,
        Category::PersonFollowedUp,
        Category::PersonLedToChrist,
    ];

    /// Wire key of this category. Doubles as the storage column name.
    pub fn key(self) -> &'static str {
        match self {
            Category::WorshipService => "worship_service",
            Category::SundaySchool => "sunday_school",
            Category::PrayerMeetings => "prayer_meetings",
            Category::BibleStudies => "bible_studies",
            Category::MensFellowships => "mens_fellowships",
            Category::WomensFellowships => "womens_fellowships",
            Category::YouthFellowships => "youth_fellowships",
            Category::ChildFellowships => "child_fellowships",
            Category::Outreach => "outreach",
            Category::TrainingOrSeminars => "training_or_seminars",
            Category::LeadershipConferences => "leadership_conferences",
            Category::LeadershipTraining => "leadership_training",
            Category::Others => "others",
            Category::FamilyDays => "family_days",
            Category::TithesAndOfferings => "tithes_and_offerings",
            Category::HomeVisited => "home_visited",
            Category::BibleStudyOrGroupLed => "bible_study_or_group_led",
            Category::SermonOrMessagePreached => "sermon_or_message_preached",
            Category::PersonNewlyContacted => "person_newly_contacted",
            Category::PersonFollowedUp => "person_followed_up",
            Category::PersonLedToChrist => "person_led_to_christ",
        }
    }

    /// Wire key of the derived per-category average on read views.
    pub fn average_key(self) -> &'static str {
        match self {
            Category::WorshipService => "worship_service_average",
            Category::SundaySchool => "sunday_school_average",
            Category::PrayerMeetings => "prayer_meetings_average",
            Category::BibleStudies => "bible_studies_average",
            Category::MensFellowships => "mens_fellowships_average",
            Category::WomensFellowships => "womens_fellowships_average",
            Category::YouthFellowships => "youth_fellowships_average",
            Category::ChildFellowships => "child_fellowships_average",
            Category::Outreach => "outreach_average",
            Category::TrainingOrSeminars => "training_or_seminars_average",
            Category::LeadershipConferences => "leadership_conferences_average",
            Category::LeadershipTraining => "leadership_training_average",
            Category::Others => "others_average",
            Category::FamilyDays => "family_days_average",
            Category::TithesAndOfferings => "tithes_and_offerings_average",
            Category::HomeVisited => "home_visited_average",
            Category::BibleStudyOrGroupLed => "bible_study_or_group_led_average",
            Category::SermonOrMessagePreached => "sermon_or_message_preached_average",
            Category::PersonNewlyContacted => "person_newly_contacted_average",
            Category::PersonFollowedUp => "person_followed_up_average",
            Category::PersonLedToChrist => "person_led_to_christ_average",
        }
    }

    /// Look up a category by its wire key.
    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Whether a report must carry a non-empty sequence for this
    /// category at creation time.
    pub fn required_at_creation(self) -> bool {
        matches!(self, Category::WorshipService | Category::SundaySchool)
    }
}

/// Ordered map from category to its per-period count sequence.
///
/// Serializes flat: each present category becomes a top-level JSON
/// field named by its wire key, so a request/response shaped like the
/// original per-field layout round-trips through this one container.
/// Unknown keys are ignored on deserialization; negative counts are
/// rejected (the values are `u32` by construction).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts(BTreeMap<Category, Vec<u32>>);

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence for a category, if one was ever supplied.
    pub fn get(&self, category: Category) -> Option<&Vec<u32>> {
        self.0.get(&category)
    }

    /// Sequence for a category, treating an absent category as empty.
    pub fn sequence(&self, category: Category) -> &[u32] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the sequence for a category.
    pub fn insert(&mut self, category: Category, counts: Vec<u32>) {
        self.0.insert(category, counts);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &Vec<u32>)> {
        self.0.iter().map(|(c, v)| (*c, v))
    }

    /// Overlay the sequences of `other` onto `self`. Categories absent
    /// from `other` are left untouched.
    pub fn merge(&mut self, other: CategoryCounts) {
        for (category, counts) in other.0 {
            self.0.insert(category, counts);
        }
    }

    /// Derived averages for every category, computed in one pass.
    /// Absent categories average to 0.
    pub fn averages(&self) -> CategoryAverages {
        CategoryAverages(
            Category::ALL
                .into_iter()
                .map(|c| (c, category_average(self.sequence(c))))
                .collect(),
        )
    }
}

impl FromIterator<(Category, Vec<u32>)> for CategoryCounts {
    fn from_iter<I: IntoIterator<Item = (Category, Vec<u32>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, counts) in &self.0 {
            map.serialize_entry(category.key(), counts)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = CategoryCounts;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of activity categories to count sequences")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut counts = BTreeMap::new();
                while let Some(key) = access.next_key::<String>()? {
                    match Category::from_key(&key) {
                        Some(category) => {
                            counts.insert(category, access.next_value::<Vec<u32>>()?);
                        }
                        // Not a category field: leave it for other
                        // (de)serializers or drop it, matching the
                        // original's unknown-field tolerance.
                        None => {
                            access.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(CategoryCounts(counts))
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}

/// Derived per-category averages of a read view.
///
/// Serializes flat as `<key>_average` fields, one per category. Never
/// persisted; always computed fresh from the entity snapshot it is
/// built from.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAverages(BTreeMap<Category, f64>);

impl CategoryAverages {
    pub fn get(&self, category: Category) -> f64 {
        self.0.get(&category).copied().unwrap_or(0.0)
    }
}

impl Serialize for CategoryAverages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, average) in &self.0 {
            map.serialize_entry(category.average_key(), average)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
