//! crates/campus_console_core/src/domain.rs
//!
//! Defines the pure, core data structures for the console.
//! These structs are independent of any transport or serialization format.

use chrono::{DateTime, Utc};
use uuid::Uuid;

//=========================================================================================
// Identity
//=========================================================================================

/// The closed set of roles the backend issues. `RouteGate` matches on this
/// exhaustively, so adding a role is a compile-time-visible change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

/// The authenticated identity attached to the current session.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Only populated for student accounts.
    pub major: Option<String>,
}

// Only used for login - contains sensitive data, never stored.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

//=========================================================================================
// Paging
//=========================================================================================

/// One page of a server-side collection, in server order. The core never
/// re-sorts items client-side.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based index of this page.
    pub page_index: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

/// Parameters for a single page fetch. Sort and filters are opaque to the
/// core; the server interprets them.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub page_index: u32,
    pub page_size: u32,
    pub sort: Option<SortSpec>,
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// A single `field = value` restriction applied server-side.
#[derive(Debug, Clone)]
pub struct Filter {
    pub field: String,
    pub value: String,
}

//=========================================================================================
// Managed Entities
//=========================================================================================

#[derive(Debug, Clone)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub major: String,
}

#[derive(Debug, Clone)]
pub struct Teacher {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: String,
}

#[derive(Debug, Clone)]
pub struct Subject {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub credits: u32,
}

/// A scheduled group for one subject, optionally assigned to a teacher.
#[derive(Debug, Clone)]
pub struct CourseGroup {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub name: String,
    pub teacher_id: Option<Uuid>,
    pub capacity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A student's request to join a course group, resolved by staff.
#[derive(Debug, Clone)]
pub struct EnrollmentRequest {
    pub id: Uuid,
    pub student_id: Uuid,
    pub group_id: Uuid,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

//=========================================================================================
// Mutation Payloads
//=========================================================================================

#[derive(Debug, Clone)]
pub struct StudentPayload {
    pub name: String,
    pub email: String,
    pub major: String,
}

#[derive(Debug, Clone)]
pub struct TeacherPayload {
    pub name: String,
    pub email: String,
    pub department: String,
}

#[derive(Debug, Clone)]
pub struct SubjectPayload {
    pub code: String,
    pub name: String,
    pub credits: u32,
}

#[derive(Debug, Clone)]
pub struct CourseGroupPayload {
    pub subject_id: Uuid,
    pub name: String,
    pub teacher_id: Option<Uuid>,
    pub capacity: u32,
}

/// Updating the status is how staff approve or reject a request.
#[derive(Debug, Clone)]
pub struct EnrollmentRequestPayload {
    pub student_id: Uuid,
    pub group_id: Uuid,
    pub status: RequestStatus,
}
