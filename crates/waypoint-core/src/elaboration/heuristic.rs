//! Deterministic, offline extraction.
//!
//! Pattern matching over the raw answer: numbers and currency amounts,
//! durations, dates, country names, yes/no and simple list splitting. It
//! stands in for a language-model service and keeps the whole pipeline
//! usable without one.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::civil::Date;
use regex::Regex;

use super::{
    extraction::{ExtractedValue, ExtractionContract, ExtractionError, Extractor},
    questions::PRIORITY_KEYWORDS,
};
use crate::{
    countries::CountryClassifier,
    models::{Activity, ActivityType, Destination, SpecField},
};

const UNIT_WORDS: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS_WORDS: [(&str, u32); 8] = [
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const SKIP_ANSWERS: &[&str] = &[
    "none", "no", "n/a", "na", "skip", "nothing", "not sure", "don't know", "dont know",
    "unknown", "?", "-",
];

const PER_PERSON_MARKERS: &[&str] = &[
    "per person",
    "per participant",
    "per head",
    "a head",
    "each",
    "per youth",
    "/person",
    "/participant",
    "pp",
];

const TOTAL_MARKERS: &[&str] = &["total", "overall", "in all", "altogether", "whole"];

/// Amounts below this without a marker are read as per-person figures.
const PER_PERSON_CEILING: u64 = 2_000;

/// Larger amounts are not taken as a budget.
const MAX_AMOUNT: u64 = 100_000_000;

const PLACE_STOPWORDS: &[&str] = &[
    "the", "in", "at", "near", "to", "of", "city", "town", "we", "will", "go", "going", "be",
    "held", "it", "is", "take", "takes", "place", "our", "exchange", "project", "planning",
    "plan", "are", "and",
];

const VENUE_KEYWORDS: &[&str] = &[
    "hostel", "hotel", "centre", "center", "camp", "venue", "house", "school", "university",
];

const FACILITATOR_KEYWORDS: &[&str] =
    &["facilitat", "trainer", "expert", "guest speaker", "external"];

const OUTDOOR_KEYWORDS: &[&str] = &[
    "outdoor", "hike", "hiking", "park", "beach", "forest", "open-air", "street",
];

const ACCESSIBILITY_KEYWORDS: &[&str] = &["wheelchair", "accessib", "step-free", "elevator", "lift"];

/// Regex and keyword based [`Extractor`].
pub struct HeuristicExtractor {
    countries: Arc<dyn CountryClassifier>,
    integer: Regex,
    amount: Regex,
    duration_unit: Regex,
    iso_date: Regex,
    day_month_year: Regex,
    month_day_year: Regex,
    hours: Regex,
    list_separator: Regex,
}

impl HeuristicExtractor {
    /// Compiles the patterns.
    pub fn new(countries: Arc<dyn CountryClassifier>) -> Result<Self, regex::Error> {
        Ok(Self {
            countries,
            integer: Regex::new(r"\b(\d{1,4})\b")?,
            amount: Regex::new(r"(?i)(\d[\d.,]*)\s*(k\b)?")?,
            duration_unit: Regex::new(r"(?i)\b(\d+|[a-z]+)[\s-]*(days?|nights?|weeks?)\b")?,
            iso_date: Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b")?,
            day_month_year: Regex::new(
                r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(?:of\s+)?([a-z]{3,9})\.?,?\s+(\d{4})\b",
            )?,
            month_day_year: Regex::new(
                r"(?i)\b([a-z]{3,9})\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b",
            )?,
            hours: Regex::new(r"(?i)(\d+)\s*(?:h|hrs?|hours?)\b")?,
            list_separator: Regex::new(r"(?i)\n|;|,|•|\s+and\s+|\s+plus\s+")?,
        })
    }

    fn participant_count(&self, text: &str) -> Option<u32> {
        self.integer
            .captures(text)
            .and_then(|c| c[1].parse::<u32>().ok())
            .or_else(|| word_number(text))
            .filter(|n| *n > 0)
    }

    fn budget(&self, text: &str) -> Option<ExtractedValue> {
        let captures = self.amount.captures(text)?;
        let amount = parse_amount(&captures[1], captures.get(2).is_some())?;
        if amount == 0 || amount > MAX_AMOUNT {
            return None;
        }

        let lower = text.to_lowercase();
        let per_person_marked = PER_PERSON_MARKERS.iter().any(|m| contains_word(&lower, m));
        let total_marked = TOTAL_MARKERS.iter().any(|m| contains_word(&lower, m));
        let per_person = if total_marked {
            false
        } else {
            per_person_marked || amount < PER_PERSON_CEILING
        };

        Some(if per_person {
            ExtractedValue::Budget {
                per_person: Some(amount),
                total: None,
            }
        } else {
            ExtractedValue::Budget {
                per_person: None,
                total: Some(amount),
            }
        })
    }

    fn duration_days(&self, text: &str) -> Option<u32> {
        let lower = text.to_lowercase();
        if lower.contains("fortnight") {
            return Some(14);
        }

        if let Some(c) = self.duration_unit.captures(&lower) {
            let count = match &c[1] {
                "a" | "an" => Some(1),
                token => token.parse::<u32>().ok().or_else(|| word_number(token)),
            };
            if let Some(count) = count {
                let unit = &c[2];
                let days = if unit.starts_with("week") {
                    count.checked_mul(7)
                } else if unit.starts_with("night") {
                    count.checked_add(1)
                } else {
                    Some(count)
                };
                return days.filter(|d| *d > 0);
            }
        }

        self.participant_count(text)
    }

    fn start_date(&self, text: &str) -> Option<Date> {
        if let Some(c) = self.iso_date.captures(text) {
            return date_from_parts(&c[1], month_number(&c[2]), &c[3]);
        }
        if let Some(c) = self.day_month_year.captures(text) {
            if let Some(month) = month_from_name(&c[2]) {
                return date_from_parts(&c[3], Some(month), &c[1]);
            }
        }
        if let Some(c) = self.month_day_year.captures(text) {
            if let Some(month) = month_from_name(&c[1]) {
                return date_from_parts(&c[3], Some(month), &c[2]);
            }
        }
        None
    }

    /// Country matches in reading order, as (code, words consumed) pairs.
    fn find_countries(&self, text: &str) -> Vec<(String, Vec<String>)> {
        let words: Vec<&str> = text
            .split(|c: char| !(c.is_alphabetic() || c == '-'))
            .filter(|w| !w.is_empty())
            .collect();

        let mut found: Vec<(String, Vec<String>)> = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let mut matched = None;
            for n in (1..=3).rev() {
                if i + n > words.len() {
                    continue;
                }
                let phrase = words[i..i + n].join(" ");
                // Two-letter words only count as codes when written as codes
                if n == 1 && phrase.len() == 2 && !phrase.chars().all(|c| c.is_ascii_uppercase()) {
                    continue;
                }
                if let Some(code) = self.countries.resolve(&phrase) {
                    matched = Some((code, n));
                    break;
                }
            }
            match matched {
                Some((code, n)) => {
                    let consumed = words[i..i + n].iter().map(|w| w.to_lowercase()).collect();
                    if !found.iter().any(|(c, _)| *c == code) {
                        found.push((code, consumed));
                    }
                    i += n;
                }
                None => i += 1,
            }
        }
        found
    }

    fn destination(&self, text: &str) -> Option<Destination> {
        let country = self.find_countries(text).into_iter().next();
        let country_words = country.as_ref().map(|(_, w)| w.clone()).unwrap_or_default();

        let mut destination = Destination {
            country: country.map(|(code, _)| code).unwrap_or_default(),
            ..Default::default()
        };

        for segment in text.split([',', ';', '\n']).map(str::trim) {
            let lower = segment.to_lowercase();
            if segment.is_empty() {
                continue;
            }
            if ACCESSIBILITY_KEYWORDS.iter().any(|k| lower.contains(k)) {
                destination.accessibility.get_or_insert_with(|| segment.to_string());
                continue;
            }
            if VENUE_KEYWORDS.iter().any(|k| lower.contains(k)) {
                destination.venue.get_or_insert_with(|| strip_place_words(segment, &[]));
                continue;
            }
            if destination.city.is_empty() {
                destination.city = strip_place_words(segment, &country_words);
            }
        }

        (!destination.is_empty()).then_some(destination)
    }

    fn split_items(&self, text: &str) -> Vec<String> {
        self.list_separator
            .split(text)
            .map(clean_item)
            .filter(|item| !item.is_empty() && !is_skip_answer(item))
            .collect()
    }

    fn activities(&self, text: &str) -> Vec<Activity> {
        let mut activities: Vec<Activity> = Vec::new();
        for item in self.split_items(text) {
            let lower = item.to_lowercase();
            let duration_hours = self
                .hours
                .captures(&lower)
                .and_then(|c| c[1].parse::<u32>().ok())
                .or_else(|| {
                    if lower.contains("half day") || lower.contains("half-day") {
                        Some(4)
                    } else if lower.contains("full day") || lower.contains("whole day") {
                        Some(8)
                    } else {
                        None
                    }
                });
            let name = capitalize(&strip_articles(&self.hours.replace_all(&item, "")));
            if name.is_empty()
                || activities
                    .iter()
                    .any(|a| a.name.eq_ignore_ascii_case(&name))
            {
                continue;
            }
            activities.push(Activity {
                name,
                activity_type: infer_activity_type(&lower),
                duration_hours,
                requires_facilitator: has_any(&lower, FACILITATOR_KEYWORDS),
                is_outdoor: has_any(&lower, OUTDOOR_KEYWORDS),
            });
        }
        activities
    }

    fn priorities(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let matched: Vec<String> = PRIORITY_KEYWORDS
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(name, _)| (*name).to_string())
            .collect();
        if matched.is_empty() {
            self.split_items(text)
        } else {
            matched
        }
    }
}

#[async_trait]
impl Extractor for HeuristicExtractor {
    async fn extract(
        &self,
        contract: &ExtractionContract,
        text: &str,
    ) -> Result<ExtractedValue, ExtractionError> {
        let field = contract.field;
        let text = text.trim();
        // "no" is a real answer to the yes/no question
        if text.is_empty() || (field != SpecField::IsPublicEvent && is_skip_answer(text)) {
            return Err(ExtractionError::Unparseable { field });
        }

        let value = match field {
            SpecField::ParticipantCount => {
                self.participant_count(text).map(ExtractedValue::ParticipantCount)
            }
            SpecField::Budget => self.budget(text),
            SpecField::Duration => self.duration_days(text).map(ExtractedValue::Duration),
            SpecField::Destination => self.destination(text).map(ExtractedValue::Destination),
            SpecField::ParticipantCountries => {
                let codes: Vec<String> =
                    self.find_countries(text).into_iter().map(|(code, _)| code).collect();
                (!codes.is_empty()).then_some(ExtractedValue::ParticipantCountries(codes))
            }
            SpecField::StartDate => self.start_date(text).map(ExtractedValue::StartDate),
            SpecField::Activities => {
                let activities = self.activities(text);
                (!activities.is_empty()).then_some(ExtractedValue::Activities(activities))
            }
            SpecField::IsPublicEvent => yes_no(text).map(ExtractedValue::IsPublicEvent),
            SpecField::Priorities => {
                let priorities = self.priorities(text);
                (!priorities.is_empty()).then_some(ExtractedValue::Priorities(priorities))
            }
            SpecField::LearningObjectives => {
                let objectives = self.split_items(text);
                (!objectives.is_empty()).then_some(ExtractedValue::LearningObjectives(objectives))
            }
        };

        value.ok_or(ExtractionError::Unparseable { field })
    }
}

fn is_skip_answer(text: &str) -> bool {
    let lower = text.trim().trim_end_matches(['.', '!']).to_lowercase();
    SKIP_ANSWERS.contains(&lower.as_str())
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.contains(|c: char| !c.is_alphanumeric()) {
        return haystack.contains(needle);
    }
    haystack
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == needle)
}

/// Parses "15,000", "15.000", "1.5k" or "400" as whole euros.
fn parse_amount(raw: &str, thousands: bool) -> Option<u64> {
    let raw = raw.trim_end_matches(['.', ',']);
    let grouped = raw
        .split(['.', ','])
        .enumerate()
        .all(|(i, part)| if i == 0 { (1..=3).contains(&part.len()) } else { part.len() == 3 })
        && raw.contains(['.', ',']);

    let value: f64 = if grouped && !thousands {
        raw.replace(['.', ','], "").parse().ok()?
    } else {
        raw.replace(',', ".").parse().ok()?
    };
    let value = if thousands { value * 1000.0 } else { value };
    (value.is_finite() && value >= 0.0).then(|| value.round() as u64)
}

/// Reads simple English number words such as "thirty five".
fn word_number(text: &str) -> Option<u32> {
    let mut total: Option<u32> = None;
    for token in text
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|t| !t.is_empty())
    {
        let value = UNIT_WORDS
            .iter()
            .position(|w| *w == token)
            .and_then(|p| u32::try_from(p).ok())
            .or_else(|| TENS_WORDS.iter().find(|(w, _)| *w == token).map(|(_, v)| *v));
        match (value, total) {
            (Some(v), Some(t)) => total = Some(t + v),
            (Some(v), None) => total = Some(v),
            (None, Some(_)) => break,
            (None, None) => {}
        }
    }
    total
}

fn month_number(raw: &str) -> Option<i8> {
    raw.parse::<i8>().ok()
}

fn month_from_name(name: &str) -> Option<i8> {
    let lower = name.to_lowercase();
    let prefix = lower.get(..3)?;
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .and_then(|p| i8::try_from(p + 1).ok())
}

fn date_from_parts(year: &str, month: Option<i8>, day: &str) -> Option<Date> {
    let year = year.parse::<i16>().ok()?;
    let day = day.parse::<i8>().ok()?;
    Date::new(year, month?, day).ok()
}

fn yes_no(text: &str) -> Option<bool> {
    let lower = text.to_lowercase();
    let first = lower
        .split(|c: char| !c.is_alphanumeric())
        .find(|w| !w.is_empty())
        .unwrap_or_default();

    if matches!(first, "no" | "nope" | "not" | "never" | "false")
        || ["not public", "private", "closed", "internal"]
            .iter()
            .any(|k| lower.contains(k))
    {
        return Some(false);
    }
    if matches!(
        first,
        "yes" | "yeah" | "yep" | "sure" | "definitely" | "true" | "absolutely" | "y"
    ) || ["public", "open to", "of course"]
        .iter()
        .any(|k| lower.contains(k))
    {
        return Some(true);
    }
    None
}

fn infer_activity_type(lower: &str) -> ActivityType {
    let has = |keys: &[&str]| has_any(lower, keys);
    if has(&["cook", "culinary", "baking"][..]) {
        ActivityType::CookingWorkshop
    } else if has(&["festival", "concert", "exhibition", "flash mob", "open day", "public"][..]) {
        ActivityType::PublicEvent
    } else if has(&["workshop", "training", "seminar", "session", "course"][..]) {
        ActivityType::Workshop
    } else if has(&["visit", "museum", "tour", "excursion", "sightseeing", "heritage"][..]) {
        ActivityType::CulturalVisit
    } else if has(&["team", "game", "energizer", "energiser", "icebreaker", "ice-breaker"][..]) {
        ActivityType::TeamBuilding
    } else if has(&["reflection", "debrief", "evaluation", "youthpass"][..]) {
        ActivityType::Reflection
    } else {
        ActivityType::Other
    }
}

fn has_any(text: &str, keys: &[&str]) -> bool {
    keys.iter().any(|k| text.contains(k))
}

/// Trims list markers and punctuation around an item.
fn clean_item(item: &str) -> String {
    item.trim()
        .trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '.' | ')' | '-' | '*'))
        .trim()
        .trim_end_matches(['.', '!'])
        .trim()
        .to_string()
}

fn strip_articles(item: &str) -> String {
    let trimmed = item.trim().trim_end_matches(['(', ')', ' ']).trim();
    for article in ["a ", "an ", "the "] {
        if trimmed.len() > article.len()
            && trimmed
                .get(..article.len())
                .is_some_and(|p| p.eq_ignore_ascii_case(article))
        {
            return trimmed[article.len()..].trim().to_string();
        }
    }
    trimmed.to_string()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Drops country words and filler around a place name.
fn strip_place_words(segment: &str, country_words: &[String]) -> String {
    let words: Vec<&str> = segment
        .split_whitespace()
        .filter(|w| {
            let lower = w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
            !country_words.contains(&lower)
        })
        .collect();

    let is_filler = |w: &&str| {
        let lower = w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
        lower.is_empty() || PLACE_STOPWORDS.contains(&lower.as_str())
    };
    let start = words.iter().position(|w| !is_filler(w)).unwrap_or(words.len());
    let end = words.iter().rposition(|w| !is_filler(w)).map_or(start, |i| i + 1);

    words[start..end.max(start)]
        .join(" ")
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}
