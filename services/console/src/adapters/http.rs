//! services/console/src/adapters/http.rs
//!
//! This module contains the REST transport adapter, the concrete implementation
//! of the `ListSource` and `IdentityService` ports from the `core` crate. It is
//! the only place that knows about endpoint shapes, JSON field names, and HTTP
//! status codes; the core only ever sees the three-kind error taxonomy.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_console_core::domain::{
    CourseGroup, CourseGroupPayload, Credentials, EnrollmentRequest, EnrollmentRequestPayload,
    Page, PageRequest, RequestStatus, Role, SortDirection, Student, StudentPayload, Subject,
    SubjectPayload, Teacher, TeacherPayload, User,
};
use campus_console_core::ports::{ApiError, ApiResult, IdentityService, ListSource};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// The shared HTTP client for the backend. The session cookie issued at login
/// lives in the client's cookie store, so one `HttpApi` carries one session.
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Creates a new `HttpApi` rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

//=========================================================================================
// Error Mapping
//=========================================================================================

/// The message envelope the backend wraps rejection details in.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn transport(error: reqwest::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

/// Collapses an HTTP failure status onto the port error taxonomy: 401 is
/// `Unauthorized`, other 4xx carry the server's message as `Validation`,
/// everything else is `Transport`.
fn classify(status: StatusCode, body: &str) -> ApiError {
    if status == StatusCode::UNAUTHORIZED {
        return ApiError::Unauthorized;
    }
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|envelope| envelope.message)
        .unwrap_or_else(|_| body.trim().to_string());
    if status.is_client_error() {
        if message.is_empty() {
            ApiError::Validation(format!("The server rejected the request ({status})"))
        } else {
            ApiError::Validation(message)
        }
    } else if message.is_empty() {
        ApiError::Transport(status.to_string())
    } else {
        ApiError::Transport(format!("{status}: {message}"))
    }
}

async fn check(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify(status, &body))
}

//=========================================================================================
// Wire Records and Conversions
//=========================================================================================

fn parse_role(raw: &str) -> ApiResult<Role> {
    match raw {
        "STUDENT" => Ok(Role::Student),
        "TEACHER" => Ok(Role::Teacher),
        "ADMIN" => Ok(Role::Admin),
        other => Err(ApiError::Transport(format!(
            "unknown role '{other}' in server response"
        ))),
    }
}

fn parse_status(raw: &str) -> ApiResult<RequestStatus> {
    match raw {
        "PENDING" => Ok(RequestStatus::Pending),
        "APPROVED" => Ok(RequestStatus::Approved),
        "REJECTED" => Ok(RequestStatus::Rejected),
        other => Err(ApiError::Transport(format!(
            "unknown request status '{other}' in server response"
        ))),
    }
}

fn status_wire(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "PENDING",
        RequestStatus::Approved => "APPROVED",
        RequestStatus::Rejected => "REJECTED",
    }
}

/// One page of a collection as the backend serializes it.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageDto<D> {
    content: Vec<D>,
    number: u32,
    size: u32,
    total_elements: u64,
    total_pages: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    id: Uuid,
    name: String,
    email: String,
    role: String,
    major: Option<String>,
}

impl UserDto {
    fn to_domain(self) -> ApiResult<User> {
        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            role: parse_role(&self.role)?,
            major: self.major,
        })
    }
}

#[derive(Serialize)]
struct LoginWire<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    id: Uuid,
    name: String,
    email: String,
    major: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentWire {
    name: String,
    email: String,
    major: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDto {
    id: Uuid,
    name: String,
    email: String,
    department: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherWire {
    name: String,
    email: String,
    department: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDto {
    id: Uuid,
    code: String,
    name: String,
    credits: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectWire {
    code: String,
    name: String,
    credits: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseGroupDto {
    id: Uuid,
    subject_id: Uuid,
    name: String,
    teacher_id: Option<Uuid>,
    capacity: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseGroupWire {
    subject_id: Uuid,
    name: String,
    teacher_id: Option<Uuid>,
    capacity: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequestDto {
    id: Uuid,
    student_id: Uuid,
    group_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequestWire {
    student_id: Uuid,
    group_id: Uuid,
    status: &'static str,
}

//=========================================================================================
// RestEntity: binding one managed entity to its collection endpoints
//=========================================================================================

/// Binds a domain entity to its collection path and wire representations.
/// `RestCollection` uses this to implement the `ListSource` port for every
/// managed entity uniformly.
pub trait RestEntity: Clone + Send + Sync + 'static {
    /// Collection segment under the API base, e.g. `students`.
    const PATH: &'static str;

    type Dto: DeserializeOwned + Send;
    type Payload: Send + Sync;
    type Wire: Serialize + Send + Sync;

    fn from_dto(dto: Self::Dto) -> ApiResult<Self>;
    fn to_wire(payload: &Self::Payload) -> Self::Wire;
}

impl RestEntity for Student {
    const PATH: &'static str = "students";

    type Dto = StudentDto;
    type Payload = StudentPayload;
    type Wire = StudentWire;

    fn from_dto(dto: StudentDto) -> ApiResult<Self> {
        Ok(Student {
            id: dto.id,
            name: dto.name,
            email: dto.email,
            major: dto.major,
        })
    }

    fn to_wire(payload: &StudentPayload) -> StudentWire {
        StudentWire {
            name: payload.name.clone(),
            email: payload.email.clone(),
            major: payload.major.clone(),
        }
    }
}

impl RestEntity for Teacher {
    const PATH: &'static str = "teachers";

    type Dto = TeacherDto;
    type Payload = TeacherPayload;
    type Wire = TeacherWire;

    fn from_dto(dto: TeacherDto) -> ApiResult<Self> {
        Ok(Teacher {
            id: dto.id,
            name: dto.name,
            email: dto.email,
            department: dto.department,
        })
    }

    fn to_wire(payload: &TeacherPayload) -> TeacherWire {
        TeacherWire {
            name: payload.name.clone(),
            email: payload.email.clone(),
            department: payload.department.clone(),
        }
    }
}

impl RestEntity for Subject {
    const PATH: &'static str = "subjects";

    type Dto = SubjectDto;
    type Payload = SubjectPayload;
    type Wire = SubjectWire;

    fn from_dto(dto: SubjectDto) -> ApiResult<Self> {
        Ok(Subject {
            id: dto.id,
            code: dto.code,
            name: dto.name,
            credits: dto.credits,
        })
    }

    fn to_wire(payload: &SubjectPayload) -> SubjectWire {
        SubjectWire {
            code: payload.code.clone(),
            name: payload.name.clone(),
            credits: payload.credits,
        }
    }
}

impl RestEntity for CourseGroup {
    const PATH: &'static str = "course-groups";

    type Dto = CourseGroupDto;
    type Payload = CourseGroupPayload;
    type Wire = CourseGroupWire;

    fn from_dto(dto: CourseGroupDto) -> ApiResult<Self> {
        Ok(CourseGroup {
            id: dto.id,
            subject_id: dto.subject_id,
            name: dto.name,
            teacher_id: dto.teacher_id,
            capacity: dto.capacity,
        })
    }

    fn to_wire(payload: &CourseGroupPayload) -> CourseGroupWire {
        CourseGroupWire {
            subject_id: payload.subject_id,
            name: payload.name.clone(),
            teacher_id: payload.teacher_id,
            capacity: payload.capacity,
        }
    }
}

impl RestEntity for EnrollmentRequest {
    const PATH: &'static str = "enrollment-requests";

    type Dto = EnrollmentRequestDto;
    type Payload = EnrollmentRequestPayload;
    type Wire = EnrollmentRequestWire;

    fn from_dto(dto: EnrollmentRequestDto) -> ApiResult<Self> {
        Ok(EnrollmentRequest {
            id: dto.id,
            student_id: dto.student_id,
            group_id: dto.group_id,
            status: parse_status(&dto.status)?,
            created_at: dto.created_at,
        })
    }

    fn to_wire(payload: &EnrollmentRequestPayload) -> EnrollmentRequestWire {
        EnrollmentRequestWire {
            student_id: payload.student_id,
            group_id: payload.group_id,
            status: status_wire(payload.status),
        }
    }
}

//=========================================================================================
// RestCollection: the ListSource implementation
//=========================================================================================

/// The `ListSource` port over one REST collection. Each management screen
/// constructs its own `RestCollection` against the shared `HttpApi`.
pub struct RestCollection<E> {
    api: Arc<HttpApi>,
    _entity: PhantomData<E>,
}

impl<E: RestEntity> RestCollection<E> {
    pub fn new(api: Arc<HttpApi>) -> Self {
        Self {
            api,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: RestEntity> ListSource for RestCollection<E> {
    type Item = E;
    type Payload = E::Payload;

    async fn fetch_page(&self, request: PageRequest) -> ApiResult<Page<E>> {
        let mut query = vec![
            ("page".to_string(), request.page_index.to_string()),
            ("size".to_string(), request.page_size.to_string()),
        ];
        if let Some(sort) = &request.sort {
            let direction = match sort.direction {
                SortDirection::Ascending => "asc",
                SortDirection::Descending => "desc",
            };
            query.push(("sort".to_string(), format!("{},{}", sort.field, direction)));
        }
        for filter in &request.filters {
            query.push((filter.field.clone(), filter.value.clone()));
        }

        let response = self
            .api
            .client
            .get(self.api.url(E::PATH))
            .query(&query)
            .send()
            .await
            .map_err(transport)?;
        let response = check(response).await?;
        let dto: PageDto<E::Dto> = response.json().await.map_err(transport)?;

        let items = dto
            .content
            .into_iter()
            .map(E::from_dto)
            .collect::<ApiResult<Vec<_>>>()?;
        Ok(Page {
            items,
            page_index: dto.number,
            page_size: dto.size,
            total_elements: dto.total_elements,
            total_pages: dto.total_pages,
        })
    }

    /// The result set comes back unpaginated. Whether the backend truncates
    /// very large result sets is not documented; no cap is imposed here.
    async fn search(&self, query: &str) -> ApiResult<Vec<E>> {
        let response = self
            .api
            .client
            .get(self.api.url(&format!("{}/search", E::PATH)))
            .query(&[("q", query)])
            .send()
            .await
            .map_err(transport)?;
        let response = check(response).await?;
        let dtos: Vec<E::Dto> = response.json().await.map_err(transport)?;
        dtos.into_iter().map(E::from_dto).collect()
    }

    async fn create(&self, payload: &E::Payload) -> ApiResult<E> {
        let response = self
            .api
            .client
            .post(self.api.url(E::PATH))
            .json(&E::to_wire(payload))
            .send()
            .await
            .map_err(transport)?;
        let response = check(response).await?;
        let dto: E::Dto = response.json().await.map_err(transport)?;
        E::from_dto(dto)
    }

    async fn update(&self, id: Uuid, payload: &E::Payload) -> ApiResult<E> {
        let response = self
            .api
            .client
            .put(self.api.url(&format!("{}/{}", E::PATH, id)))
            .json(&E::to_wire(payload))
            .send()
            .await
            .map_err(transport)?;
        let response = check(response).await?;
        let dto: E::Dto = response.json().await.map_err(transport)?;
        E::from_dto(dto)
    }

    async fn remove(&self, id: Uuid) -> ApiResult<()> {
        let response = self
            .api
            .client
            .delete(self.api.url(&format!("{}/{}", E::PATH, id)))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }
}

//=========================================================================================
// IdentityService implementation
//=========================================================================================

#[async_trait]
impl IdentityService for HttpApi {
    async fn current_identity(&self) -> ApiResult<User> {
        let response = self
            .client
            .get(self.url("auth/me"))
            .send()
            .await
            .map_err(transport)?;
        let response = check(response).await?;
        let dto: UserDto = response.json().await.map_err(transport)?;
        dto.to_domain()
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<User> {
        let wire = LoginWire {
            email: &credentials.email,
            password: &credentials.password,
        };
        let response = self
            .client
            .post(self.url("auth/login"))
            .json(&wire)
            .send()
            .await
            .map_err(transport)?;
        let response = check(response).await?;
        let dto: UserDto = response.json().await.map_err(transport)?;
        dto.to_domain()
    }

    async fn logout(&self) -> ApiResult<()> {
        let response = self
            .client
            .post(self.url("auth/logout"))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_status_maps_to_unauthorized() {
        assert!(matches!(
            classify(StatusCode::UNAUTHORIZED, r#"{"message":"expired"}"#),
            ApiError::Unauthorized
        ));
    }

    #[test]
    fn client_errors_carry_the_server_message() {
        let error = classify(StatusCode::BAD_REQUEST, r#"{"message":"email is taken"}"#);
        match error {
            ApiError::Validation(message) => assert_eq!(message, "email is taken"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn unenveloped_client_error_bodies_are_used_verbatim() {
        let error = classify(StatusCode::UNPROCESSABLE_ENTITY, "capacity must be positive");
        match error {
            ApiError::Validation(message) => assert_eq!(message, "capacity must be positive"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn server_errors_map_to_transport() {
        assert!(matches!(
            classify(StatusCode::BAD_GATEWAY, ""),
            ApiError::Transport(_)
        ));
    }

    #[test]
    fn page_payloads_deserialize_and_convert() {
        let json = r#"{
            "content": [
                {"id":"7f2c3cde-5a7e-4e03-9f2b-2b2f6f3c1a11","name":"Ada Lovelace","email":"ada@campus.edu","major":"Mathematics"}
            ],
            "number": 2,
            "size": 10,
            "totalElements": 43,
            "totalPages": 5
        }"#;
        let dto: PageDto<StudentDto> = serde_json::from_str(json).unwrap();
        assert_eq!(dto.number, 2);
        assert_eq!(dto.total_elements, 43);
        assert_eq!(dto.total_pages, 5);

        let student = Student::from_dto(dto.content.into_iter().next().unwrap()).unwrap();
        assert_eq!(student.name, "Ada Lovelace");
        assert_eq!(student.major, "Mathematics");
    }

    #[test]
    fn enrollment_request_status_round_trips() {
        let json = r#"{
            "id":"0a43b8ff-63a4-44f5-a1b1-2b9c82b6f001",
            "studentId":"c4b7ae8a-7e83-4b5b-bb1d-111111111111",
            "groupId":"c4b7ae8a-7e83-4b5b-bb1d-222222222222",
            "status":"PENDING",
            "createdAt":"2026-02-11T09:30:00Z"
        }"#;
        let dto: EnrollmentRequestDto = serde_json::from_str(json).unwrap();
        let request = EnrollmentRequest::from_dto(dto).unwrap();
        assert_eq!(request.status, RequestStatus::Pending);

        let payload = EnrollmentRequestPayload {
            student_id: request.student_id,
            group_id: request.group_id,
            status: RequestStatus::Approved,
        };
        let wire = serde_json::to_value(EnrollmentRequest::to_wire(&payload)).unwrap();
        assert_eq!(wire["status"], "APPROVED");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let dto = UserDto {
            id: Uuid::new_v4(),
            name: "Sam".to_string(),
            email: "sam@campus.edu".to_string(),
            role: "JANITOR".to_string(),
            major: None,
        };
        assert!(matches!(dto.to_domain(), Err(ApiError::Transport(_))));
    }
}
