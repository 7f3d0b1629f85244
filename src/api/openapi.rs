//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assignments, auth, health, instruments, movements, programs, students};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Orquesta API",
        version = "1.0.0",
        description = "Orchestra Educational Program Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        // Programs
        programs::list_programs,
        programs::get_program,
        programs::create_program,
        programs::update_program,
        programs::delete_program,
        // Students
        students::list_students,
        students::get_student,
        students::create_student,
        students::update_student,
        students::delete_student,
        // Instruments
        instruments::list_instruments,
        instruments::get_instrument,
        instruments::create_instrument,
        instruments::update_instrument,
        instruments::delete_instrument,
        // Assignments
        assignments::list_assignments,
        assignments::get_assignment,
        assignments::create_assignment,
        assignments::update_assignment,
        assignments::return_assignment,
        assignments::delete_assignment,
        // Movements
        movements::list_movements,
        movements::get_movement,
        movements::create_movement,
        movements::update_movement,
        movements::delete_movement,
    ),
    components(
        schemas(
            // Auth
            auth::LoginResponse,
            crate::models::user::RegisterUser,
            crate::models::user::LoginUser,
            crate::models::user::UserPublic,
            // Programs
            crate::models::program::Program,
            crate::models::program::CreateProgram,
            crate::models::program::UpdateProgram,
            // Students
            crate::models::student::StudentDetails,
            crate::models::student::CreateStudent,
            crate::models::student::UpdateStudent,
            // Instruments
            crate::models::instrument::Instrument,
            crate::models::instrument::CreateInstrument,
            crate::models::instrument::UpdateInstrument,
            // Assignments
            crate::models::assignment::AssignmentDetails,
            crate::models::assignment::CreateAssignment,
            crate::models::assignment::UpdateAssignment,
            crate::models::assignment::ReturnAssignment,
            // Movements
            crate::models::movement::MovementDetails,
            crate::models::movement::CreateMovement,
            crate::models::movement::UpdateMovement,
            // Enums
            crate::models::enums::InstrumentStatus,
            crate::models::enums::MovementType,
            crate::models::enums::Role,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "programas", description = "Educational program management"),
        (name = "alumnos", description = "Student management"),
        (name = "instrumentos", description = "Instrument directory"),
        (name = "asignaciones", description = "Instrument assignment ledger"),
        (name = "movimientos", description = "Inventory movement ledger")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
