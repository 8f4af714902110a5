pub mod domain;
pub mod gate;
pub mod list;
pub mod pagination;
pub mod ports;
pub mod session;

pub use domain::{
    CourseGroup, CourseGroupPayload, Credentials, EnrollmentRequest, EnrollmentRequestPayload,
    Filter, Page, PageRequest, RequestStatus, Role, SortDirection, SortSpec, Student,
    StudentPayload, Subject, SubjectPayload, Teacher, TeacherPayload, User,
};
pub use gate::{RouteDecision, RouteGate};
pub use list::{ListController, ListState};
pub use pagination::{plan, PageEntry};
pub use ports::{ApiError, ApiResult, IdentityService, ListSource};
pub use session::{SessionState, SessionStore};
