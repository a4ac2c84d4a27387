//! Sample courses and settings for a new installation.
//!
//! Only the public [`DocumentStore`] operations are used here.

use crate::error::Result;
use crate::model::{Document, Fields, Snapshot, COURSES, SETTINGS};
use crate::store::backend::StorageBackend;
use crate::store::document_store::DocumentStore;
use serde_json::{json, Value};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// `courses` already had documents; nothing was written.
    Skipped { existing_courses: usize },
    Seeded { courses: usize },
}

fn object(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}

pub fn sample_courses() -> Vec<Fields> {
    vec![
        object(json!({
            "title": "Introduction to Computer Science",
            "description": "Learn the fundamentals of computer science and programming",
            "category": "Computer Science",
            "level": "Beginner",
            "duration": "8 weeks",
            "topics": ["Programming Basics", "Data Structures", "Algorithms"],
            "instructor": "Dr. Sarah Johnson",
            "rating": 4.8,
            "enrolledStudents": 1250,
            "image": "assets/images/course1.jpg"
        })),
        object(json!({
            "title": "Business Management Fundamentals",
            "description": "Essential principles of business management and leadership",
            "category": "Business Administration",
            "level": "Intermediate",
            "duration": "6 weeks",
            "topics": ["Leadership", "Strategic Planning", "Team Management"],
            "instructor": "Prof. Michael Chen",
            "rating": 4.6,
            "enrolledStudents": 980,
            "image": "assets/images/course2.jpg"
        })),
        object(json!({
            "title": "Engineering Mathematics",
            "description": "Advanced mathematical concepts for engineering students",
            "category": "Engineering",
            "level": "Advanced",
            "duration": "10 weeks",
            "topics": ["Calculus", "Linear Algebra", "Differential Equations"],
            "instructor": "Dr. Robert Williams",
            "rating": 4.7,
            "enrolledStudents": 750,
            "image": "assets/images/course3.jpg"
        })),
        object(json!({
            "title": "Medical Ethics and Law",
            "description": "Understanding ethical and legal issues in healthcare",
            "category": "Medicine",
            "level": "Intermediate",
            "duration": "7 weeks",
            "topics": ["Medical Ethics", "Healthcare Law", "Patient Rights"],
            "instructor": "Dr. Emily Rodriguez",
            "rating": 4.9,
            "enrolledStudents": 650,
            "image": "assets/images/course4.jpg"
        })),
        object(json!({
            "title": "Legal Research Methods",
            "description": "Effective legal research and writing techniques",
            "category": "Law",
            "level": "Beginner",
            "duration": "5 weeks",
            "topics": ["Legal Research", "Case Analysis", "Legal Writing"],
            "instructor": "Prof. David Thompson",
            "rating": 4.5,
            "enrolledStudents": 420,
            "image": "assets/images/course5.jpg"
        })),
    ]
}

/// The full settings document, a superset of the store's initial one.
pub fn demo_settings() -> Fields {
    object(json!({
        "theme": "light",
        "notifications": true,
        "emailUpdates": true,
        "studyReminders": true,
        "language": "en",
        "timezone": "UTC",
        "accessibility": {
            "fontSize": "medium",
            "highContrast": false,
            "screenReader": false
        }
    }))
}

/// Adds the sample courses and settings unless `courses` already has data.
pub fn seed_demo_data<B: StorageBackend>(db: &mut DocumentStore<B>) -> Result<SeedOutcome> {
    let existing_courses = db.get_collection(COURSES).len();
    if existing_courses > 0 {
        debug!(existing_courses, "Demo data already present, skipping");
        return Ok(SeedOutcome::Skipped { existing_courses });
    }

    let courses = sample_courses();
    let count = courses.len();
    for course in courses {
        db.add_document(COURSES, course)?;
    }

    match db.get_collection(SETTINGS).first() {
        Some(current) => {
            db.update_document(SETTINGS, &current.id, demo_settings())?;
        }
        None => {
            db.add_document(SETTINGS, demo_settings())?;
        }
    }

    info!(courses = count, "Seeded demo data");
    Ok(SeedOutcome::Seeded { courses: count })
}

/// Only the collections the seeder writes.
pub fn export_demo_data<B: StorageBackend>(db: &DocumentStore<B>) -> Snapshot {
    let mut snapshot = Snapshot::default();
    for name in [COURSES, SETTINGS] {
        let docs: Vec<Document> = db.get_collection(name);
        snapshot.data.insert(name.to_string(), docs);
    }
    snapshot
}
