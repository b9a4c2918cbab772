use crate::data::{
    CourseReport, DaySource, Diagnostic, DiagnosticKind, GenerationInput, GenerationOutput,
    Placement, TeacherCheck,
};
use crate::ledger::{RoomLedger, TeacherLedger};
use itertools::iproduct;
use log::{error, info, trace};
use std::collections::HashMap;
use std::time::Instant;

const BASE_SCORE: i32 = 100;
const TEACHER_UNAVAILABLE_PENALTY: i32 = 30;
const ROOM_RESERVED_PENALTY: i32 = 50;
const DISPERSION_PENALTY: i32 = 20;
const DISPERSION_THRESHOLD: u32 = 4;

/// Every committed session lasts two hours.
const SESSION_HOURS: u32 = 2;

struct Teacher {
    name: String,
    ledger: TeacherLedger,
}

struct Room {
    name: String,
    ledger: RoomLedger,
}

struct Course {
    name: String,
    total_hours: u32,
    remaining_hours: i32,
    teacher: usize,
    placements: Vec<Placement>,
}

/// Append-only sequence of committed placements plus the catalogs the run
/// iterated over. The allocator is the only writer.
#[derive(Debug, Clone)]
pub struct Schedule {
    events: Vec<Placement>,
    time_slots: Vec<String>,
    days: Vec<String>,
}

impl Schedule {
    fn new(time_slots: Vec<String>, days: Vec<String>) -> Self {
        Self {
            events: Vec::new(),
            time_slots,
            days,
        }
    }

    pub fn events(&self) -> &[Placement] {
        &self.events
    }

    pub fn time_slots(&self) -> &[String] {
        &self.time_slots
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }

    fn add_event(&mut self, event: Placement) {
        self.events.push(event);
    }
}

/// Greedily fills the timetable, course by course in input order.
///
/// Each course keeps claiming the single best-scoring (day, slot, room)
/// triple until its hours run out or no triple passes the availability
/// filter. Committed placements are never revisited.
pub fn generate(input: &GenerationInput) -> Result<GenerationOutput, String> {
    let start_time = Instant::now();

    let mut teachers: Vec<Teacher> = input
        .teachers
        .iter()
        .map(|t| Teacher {
            name: t.name.clone(),
            ledger: TeacherLedger::new(t.max_hours_per_week),
        })
        .collect();
    let teacher_index: HashMap<&str, usize> = input
        .teachers
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.as_str(), i))
        .collect();
    let mut rooms: Vec<Room> = input
        .rooms
        .iter()
        .map(|r| Room {
            name: r.name.clone(),
            ledger: RoomLedger::default(),
        })
        .collect();

    // A course bound to an unknown teacher is a caller contract violation,
    // caught before the loop rather than handled inside it.
    let mut courses: Vec<Course> = input
        .courses
        .iter()
        .map(|c| {
            let teacher = *teacher_index.get(c.teacher.as_str()).ok_or_else(|| {
                format!(
                    "Course '{}' references unknown teacher '{}'",
                    c.name, c.teacher
                )
            })?;
            Ok(Course {
                name: c.name.clone(),
                total_hours: c.total_hours,
                remaining_hours: c.total_hours as i32,
                teacher,
                placements: Vec::new(),
            })
        })
        .collect::<Result<_, String>>()?;

    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let days = match &input.day_source {
        DaySource::Days(days) => days.clone(),
        DaySource::Period(period) => match period.allowed_dates() {
            Some(dates) => {
                info!("Allowed dates for period: {}", dates.join(", "));
                dates
            }
            None => {
                error!("Invalid period provided. Make sure 'start' and 'end' are defined.");
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::InvalidPeriod,
                    message: "Invalid period provided. Make sure 'start' and 'end' are defined."
                        .to_string(),
                });
                return Ok(GenerationOutput {
                    placements: Vec::new(),
                    diagnostics,
                    courses: course_reports(&courses),
                });
            }
        },
    };

    let mut schedule = Schedule::new(input.time_slots.clone(), days);
    info!(
        "Allocating {} courses across {} rooms, {} days and {} slots per day...",
        courses.len(),
        rooms.len(),
        schedule.days().len(),
        schedule.time_slots().len()
    );

    for course in &mut courses {
        while course.remaining_hours > 0 {
            trace!(
                "Remaining hours for {}: {}",
                course.name, course.remaining_hours
            );

            let mut best_score = i32::MIN;
            let mut best: Option<(usize, usize, usize)> = None;
            let teacher = &teachers[course.teacher];

            // Day-major, then slot, then room; the strict comparison below
            // makes the first-seen triple win ties, so this nesting order is
            // what keeps runs reproducible.
            for (di, si, ri) in iproduct!(
                0..schedule.days().len(),
                0..schedule.time_slots().len(),
                0..rooms.len()
            ) {
                let day = schedule.days()[di].as_str();
                let slot = schedule.time_slots()[si].as_str();
                let room = &rooms[ri];

                if !teacher.ledger.is_available(day, slot) {
                    diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::CandidateDiscarded,
                        message: format!(
                            "Teacher {} is not available on {} at {}.",
                            teacher.name, day, slot
                        ),
                    });
                    continue;
                }

                let score = score_candidate(day, slot, room, teacher, input.teacher_check);
                trace!(
                    "Score for course \"{}\" on {} at {} in {} with {}: {}",
                    course.name, day, slot, room.name, teacher.name, score
                );

                if score > best_score {
                    best_score = score;
                    best = Some((di, si, ri));
                }
            }

            match best {
                Some((di, si, ri)) => {
                    let day = schedule.days()[di].clone();
                    let slot = schedule.time_slots()[si].clone();
                    let event = Placement {
                        course: course.name.clone(),
                        teacher: teachers[course.teacher].name.clone(),
                        room: rooms[ri].name.clone(),
                        day: day.clone(),
                        time_slot: slot.clone(),
                        duration_hours: SESSION_HOURS,
                    };

                    schedule.add_event(event.clone());
                    course.placements.push(event.clone());
                    course.remaining_hours -= SESSION_HOURS as i32;
                    rooms[ri].ledger.reserve(&day, &slot);
                    let teacher = &mut teachers[course.teacher];
                    teacher.ledger.reserve(&day, &slot);
                    teacher.ledger.assign_hours(&day, SESSION_HOURS);

                    diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::Committed,
                        message: format!(
                            "Scheduled {} on {} at {} in {} with {}",
                            event.course, event.day, event.time_slot, event.room, event.teacher
                        ),
                    });
                }
                None => {
                    let message = format!("Could not find a slot for {}", course.name);
                    error!("{message}");
                    diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::CourseUnsatisfiable,
                        message,
                    });
                    break;
                }
            }
        }
    }

    info!(
        "Committed {} placements in {:.2?}",
        schedule.events().len(),
        start_time.elapsed()
    );

    Ok(GenerationOutput {
        placements: schedule.events().to_vec(),
        diagnostics,
        courses: course_reports(&courses),
    })
}

/// Scores one candidate triple against the current ledger state. Pure read;
/// penalties stack independently. Room capacity, resources and preferred
/// days exist on the input but deliberately never enter the score.
fn score_candidate(
    day: &str,
    slot: &str,
    room: &Room,
    teacher: &Teacher,
    check: TeacherCheck,
) -> i32 {
    let mut score = BASE_SCORE;

    let teacher_free = match check {
        TeacherCheck::SlotAware => teacher.ledger.is_available(day, slot),
        TeacherCheck::DayOnly => teacher.ledger.has_daily_capacity(day),
    };
    if !teacher_free {
        score -= TEACHER_UNAVAILABLE_PENALTY;
    }

    if !room.ledger.is_available(day, slot) {
        score -= ROOM_RESERVED_PENALTY;
    }

    if teacher.ledger.daily_load(day) >= DISPERSION_THRESHOLD {
        score -= DISPERSION_PENALTY;
    }

    score
}

fn course_reports(courses: &[Course]) -> Vec<CourseReport> {
    courses
        .iter()
        .map(|c| CourseReport {
            name: c.name.clone(),
            total_hours: c.total_hours,
            remaining_hours: c.remaining_hours,
            placements: c.placements.clone(),
        })
        .collect()
}
