//! Task checklists per phase sub-type.
//!
//! Each sub-type has a fixed task list. Task text may contain placeholders
//! that are filled from the specification:
//!
//! | placeholder | value |
//! |---|---|
//! | `{participants}` | participant count |
//! | `{destination}` | "city, country" |
//! | `{duration}` | exchange length in days |
//! | `{phase}` | the phase name |
//! | `{budget}` | total budget in euros |
//! | `{insurance}` | "group" or "individual" |
//! | `{visa_countries}` | origin countries needing a visa |

use jiff::{civil::Date, Span};
use uuid::Uuid;

use super::requirements::Requirements;
use crate::models::{
    ActivityType, ChecklistTask, PermitType, PhaseKind, PhaseTemplate, SpecificationState,
    TaskCategory::{self, Admin, Booking, Coordination, Planning},
    TaskPriority::{self, High, Low, Medium},
    TravelDirection,
};

/// One templated task; `due` counts days back from the phase deadline.
#[derive(Debug, Clone, Copy)]
struct TaskTemplate {
    text: &'static str,
    category: TaskCategory,
    priority: TaskPriority,
    due: Option<i64>,
}

const fn task(
    text: &'static str,
    category: TaskCategory,
    priority: TaskPriority,
    due: Option<i64>,
) -> TaskTemplate {
    TaskTemplate {
        text,
        category,
        priority,
        due,
    }
}

const APPLICATION: &[TaskTemplate] = &[
    task("Review programme guidelines and eligibility criteria", Planning, High, None),
    task(
        "Complete project narrative sections (objectives, activities, impact)",
        Admin,
        High,
        Some(7),
    ),
    task("Prepare detailed budget breakdown for €{budget}", Admin, High, None),
    task("Gather partner organisation documents and agreements", Admin, Medium, None),
    task("Collect CVs and qualifications of project staff", Admin, Medium, None),
    task("Write learning outcomes and impact assessment plan", Planning, High, None),
    task("Submit application before the deadline", Admin, High, Some(0)),
];

const ACCOMMODATION: &[TaskTemplate] = &[
    task(
        "Research {participants}-person hostels and hotels in {destination}",
        Planning,
        High,
        None,
    ),
    task("Request quotes from 3-5 accommodation providers", Booking, High, None),
    task(
        "Confirm accessibility features (wheelchair access, elevators)",
        Planning,
        Medium,
        None,
    ),
    task("Confirm group booking discount availability", Booking, Medium, None),
    task("Check cancellation policies and payment terms", Admin, Medium, None),
    task("Book accommodation and get written confirmation", Booking, High, Some(0)),
    task("Share accommodation details with all participants", Coordination, Medium, None),
];

const TRAVEL_OUTBOUND: &[TaskTemplate] = &[
    task("Research outbound train and flight options to {destination}", Planning, High, None),
    task("Request group booking quotes from carriers", Booking, High, None),
    task("Book outbound travel for {participants} participants", Booking, High, Some(7)),
    task("Collect passport or ID copies from all participants", Admin, High, None),
    task("Create the outbound travel itinerary document", Planning, Medium, None),
    task("Arrange pickup at the destination airport or station", Booking, Medium, None),
    task("Send outbound travel details to all participants", Coordination, High, Some(3)),
];

const TRAVEL_RETURN: &[TaskTemplate] = &[
    task("Research return train and flight options from {destination}", Planning, High, None),
    task("Request group quotes for the return journey", Booking, High, None),
    task("Book return travel for {participants} participants", Booking, High, Some(0)),
    task("Reconfirm return bookings with every sending group", Admin, Medium, None),
    task("Create the return travel itinerary document", Planning, Medium, None),
    task("Arrange transport to the departure airport or station", Booking, Medium, None),
    task("Send return travel details to all participants", Coordination, High, Some(0)),
];

const FOOD: &[TaskTemplate] = &[
    task(
        "Collect dietary restrictions and allergies from all participants",
        Planning,
        High,
        None,
    ),
    task("Research catering options in {destination}", Planning, Medium, None),
    task("Request quotes from 3+ catering companies", Booking, Medium, None),
    task(
        "Plan the menu for {duration} days covering all dietary needs",
        Planning,
        Medium,
        None,
    ),
    task("Book catering services and confirm the menu", Booking, High, Some(0)),
    task("Confirm the meal schedule with the accommodation venue", Coordination, Medium, None),
    task("Arrange water, coffee and snacks for activity breaks", Booking, Low, None),
];

const WORKSHOP: &[TaskTemplate] = &[
    task("Book a facilitator for \"{phase}\"", Booking, High, Some(14)),
    task("Prepare the materials and supplies list", Planning, Medium, None),
    task("Purchase or print workshop materials and handouts", Booking, Medium, Some(3)),
    task("Test equipment and set up the venue", Planning, Medium, None),
    task("Prepare certificates and evaluation forms", Admin, Low, None),
];

const CULTURAL_VISIT: &[TaskTemplate] = &[
    task("Book tickets for {phase}", Booking, High, Some(7)),
    task("Arrange a group tour guide if needed", Booking, Medium, None),
    task("Check accessibility for all {participants} participants", Planning, Medium, None),
    task("Plan transport to and from the activity location", Planning, Medium, None),
];

const GENERIC_ACTIVITY: &[TaskTemplate] = &[
    task("Prepare for \"{phase}\"", Planning, Medium, None),
    task("Confirm venue and equipment availability", Booking, Medium, None),
    task("Brief participants on the activity objectives", Coordination, Low, None),
];

const INSURANCE: &[TaskTemplate] = &[
    task("Research {insurance} travel insurance options", Planning, High, None),
    task("Request quotes from 3+ insurance providers", Booking, Medium, None),
    task(
        "Compare coverage (medical, liability, cancellation, evacuation)",
        Planning,
        Medium,
        None,
    ),
    task("Purchase {insurance} travel insurance", Booking, High, Some(0)),
    task("Collect participant personal details for the policy", Admin, Medium, None),
    task("Distribute insurance certificates to all participants", Coordination, Medium, None),
];

const VISA: &[TaskTemplate] = &[
    task(
        "Collect visa application forms for participants from {visa_countries}",
        Admin,
        High,
        None,
    ),
    task("Book visa appointment slots for {participants} participants", Booking, High, None),
    task("Prepare invitation letters for the visa applications", Admin, High, None),
    task("Help participants complete their visa applications", Coordination, Medium, None),
    task("Track visa application status for every participant", Admin, Medium, None),
    task("Confirm all visas are approved before travel", Admin, High, Some(0)),
];

const EVENT_PERMIT: &[TaskTemplate] = &[
    task("Research local event permit requirements in {destination}", Planning, High, None),
    task("Complete the event permit application form", Admin, High, None),
    task("Submit the application to the local municipality", Admin, High, None),
    task("Follow up on the permit application status", Coordination, Medium, None),
    task("Receive the approved event permit", Admin, High, Some(0)),
];

const OTHER_PERMIT: &[TaskTemplate] = &[
    task("Research permit requirements for {phase}", Planning, High, None),
    task("Complete and submit the permit application", Admin, High, Some(7)),
    task("Receive the approved permit", Admin, High, Some(0)),
];

const REPORTING: &[TaskTemplate] = &[
    task("Collect participant feedback forms and evaluations", Admin, High, None),
    task("Compile photos, videos and documentation from activities", Admin, Medium, None),
    task(
        "Draft the final report narrative (objectives, activities, outcomes)",
        Admin,
        High,
        None,
    ),
    task("Complete the financial report with receipts and invoices", Admin, High, None),
    task("Write the impact assessment and learning outcomes analysis", Planning, Medium, None),
    task("Prepare dissemination materials (social media, website)", Coordination, Low, None),
    task("Submit the final report to the funding agency", Admin, High, Some(0)),
];

const CUSTOM: &[TaskTemplate] = &[task("Complete tasks for {phase}", Planning, Medium, None)];

fn templates_for(kind: &PhaseKind) -> &'static [TaskTemplate] {
    match kind {
        PhaseKind::Application => APPLICATION,
        PhaseKind::Accommodation => ACCOMMODATION,
        PhaseKind::Travel {
            direction: TravelDirection::Outbound,
        } => TRAVEL_OUTBOUND,
        PhaseKind::Travel {
            direction: TravelDirection::Return,
        } => TRAVEL_RETURN,
        PhaseKind::Food => FOOD,
        PhaseKind::Activity { activity_type } => match activity_type {
            ActivityType::Workshop | ActivityType::CookingWorkshop => WORKSHOP,
            ActivityType::CulturalVisit => CULTURAL_VISIT,
            _ => GENERIC_ACTIVITY,
        },
        PhaseKind::Insurance { .. } => INSURANCE,
        PhaseKind::Permit {
            permit: PermitType::Visa,
        } => VISA,
        PhaseKind::Permit {
            permit: PermitType::Event,
        } => EVENT_PERMIT,
        PhaseKind::Permit { .. } => OTHER_PERMIT,
        PhaseKind::Reporting => REPORTING,
        PhaseKind::Custom { .. } => CUSTOM,
    }
}

/// Values substituted into task text.
struct Placeholders {
    values: Vec<(&'static str, String)>,
}

impl Placeholders {
    fn new(phase: &PhaseTemplate, spec: &SpecificationState, requirements: &Requirements) -> Self {
        let destination = spec
            .destination
            .as_ref()
            .map(|d| d.label())
            .unwrap_or_else(|| "the destination".to_string());
        let visa_countries = if requirements.visas.countries.is_empty() {
            "all countries".to_string()
        } else {
            requirements.visas.countries.join(", ")
        };
        Self {
            values: vec![
                (
                    "{participants}",
                    spec.participant_count.unwrap_or_default().to_string(),
                ),
                ("{destination}", destination),
                ("{duration}", spec.duration_days.unwrap_or_default().to_string()),
                ("{phase}", phase.name.clone()),
                (
                    "{budget}",
                    spec.budget.map_or(0, |b| b.total).to_string(),
                ),
                ("{insurance}", requirements.insurance.label().to_string()),
                ("{visa_countries}", visa_countries),
            ],
        }
    }

    fn fill(&self, text: &str) -> String {
        self.values
            .iter()
            .fold(text.to_string(), |acc, (key, value)| acc.replace(key, value))
    }
}

fn due_date(phase: &PhaseTemplate, days_before: i64) -> Option<Date> {
    let base = phase.deadline.unwrap_or(phase.end_date);
    let due = Span::new()
        .try_days(-days_before)
        .ok()
        .and_then(|span| base.checked_add(span).ok())?;
    Some(due.max(phase.start_date).min(base))
}

/// Builds the checklist for one phase. Never empty.
pub fn generate(
    phase: &PhaseTemplate,
    spec: &SpecificationState,
    requirements: &Requirements,
) -> Vec<ChecklistTask> {
    let placeholders = Placeholders::new(phase, spec, requirements);
    let mut templates = templates_for(&phase.kind);
    if templates.is_empty() {
        templates = CUSTOM;
    }

    templates
        .iter()
        .map(|template| ChecklistTask {
            id: Uuid::new_v4().to_string(),
            description: placeholders.fill(template.text),
            completed: false,
            due_date: template.due.and_then(|days| due_date(phase, days)),
            category: template.category,
            priority: template.priority,
        })
        .collect()
}
