//! JSON API over the match store: tournaments, teams, roster import and bracket generation.
//! Run with: cargo run --bin web
//! Configuration comes from the environment, see `tournament_matches::config`.

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, middleware, post, put,
    web::{self, Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use subtle::ConstantTimeEq;
use tournament_matches::{
    parse_roster, MatchId, MatchStore, ServerConfig, StoreError, StoredMatch, TeamId, Tournament,
    TournamentId, TournamentTeam, TournamentType,
};

type AppState = Data<RwLock<MatchStore>>;

/// Session key set once the admin password has been checked.
const ADMIN_SESSION_KEY: &str = "admin";

/// Password the login endpoint compares against.
struct AdminAuth {
    password: String,
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct LoginBody {
    password: String,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(rename = "type")]
    tournament_type: TournamentType,
    max_teams: u32,
    /// Defaults to now.
    start_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
    team_number: Option<i32>,
}

#[derive(Deserialize)]
struct AssignTeamsBody {
    team1_id: Option<TeamId>,
    team2_id: Option<TeamId>,
}

#[derive(Serialize)]
struct TournamentView<'a> {
    #[serde(flatten)]
    tournament: &'a Tournament,
    teams: &'a [TournamentTeam],
    capacity: Option<u32>,
}

#[derive(Serialize)]
struct MatchesView<'a> {
    capacity: Option<u32>,
    matches: &'a [StoredMatch],
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and team id
#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: TeamId,
}

/// Path segments: tournament id and match id
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_response(e: &StoreError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    if e.is_not_found() {
        HttpResponse::NotFound().json(body)
    } else {
        HttpResponse::BadRequest().json(body)
    }
}

fn lock_error() -> HttpResponse {
    log::error!("Match store lock is poisoned");
    HttpResponse::InternalServerError().json(serde_json::json!({ "error": "lock error" }))
}

/// Compare in constant time so response timing does not leak the password.
fn password_matches(given: &str, expected: &str) -> bool {
    given.as_bytes().ct_eq(expected.as_bytes()).into()
}

fn is_admin(session: &Session) -> bool {
    matches!(session.get::<bool>(ADMIN_SESSION_KEY), Ok(Some(true)))
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Unauthorized" }))
}

fn tournament_view(store: &MatchStore, id: TournamentId) -> Result<HttpResponse, StoreError> {
    let view = TournamentView {
        tournament: store.tournament(id)?,
        teams: store.teams(id)?,
        capacity: store.capacity(id)?,
    };
    Ok(HttpResponse::Ok().json(view))
}

fn matches_view(store: &MatchStore, id: TournamentId) -> Result<HttpResponse, StoreError> {
    let view = MatchesView {
        capacity: store.capacity(id)?,
        matches: store.matches(id)?,
    };
    Ok(HttpResponse::Ok().json(view))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-matches",
    })
}

/// Check the admin password and mark the session as admin.
#[post("/api/login")]
async fn api_login(auth: Data<AdminAuth>, session: Session, body: Json<LoginBody>) -> HttpResponse {
    if !password_matches(&body.password, &auth.password) {
        log::warn!("Rejected admin login");
        return unauthorized();
    }
    match session.insert(ADMIN_SESSION_KEY, true) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(e) => {
            log::error!("Could not store admin session: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": "session error" }))
        }
    }
}

#[post("/api/logout")]
async fn api_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(serde_json::json!({ "success": true }))
}

/// Create a tournament (admin).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    session: Session,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let body = body.into_inner();
    let start_date = body.start_date.unwrap_or_else(Utc::now);
    let id = g
        .create_tournament(body.name.trim(), body.tournament_type, body.max_teams, start_date)
        .id;
    tournament_view(&g, id).unwrap_or_else(|e| error_response(&e))
}

/// List all tournaments.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.tournaments())
}

/// Get a tournament with its teams (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    tournament_view(&g, path.id).unwrap_or_else(|e| error_response(&e))
}

/// Delete a tournament with its teams and matches (admin).
#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.delete_tournament(path.id) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}/teams")]
async fn api_list_teams(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.teams(path.id) {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => error_response(&e),
    }
}

/// Enter a team (admin). Without `team_number` it is seeded last.
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
    body: Json<AddTeamBody>,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.add_team(path.id, &body.name, body.team_number) {
        Ok(team) => HttpResponse::Created().json(team),
        Err(e) => error_response(&e),
    }
}

/// Remove a team by id (admin).
#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn api_remove_team(
    state: AppState,
    session: Session,
    path: Path<TournamentTeamPath>,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.remove_team(path.id, path.team_id) {
        Ok(team) => HttpResponse::Ok().json(team),
        Err(e) => error_response(&e),
    }
}

/// Import a CSV roster (`name,team_number`) as the request body (admin).
/// All rows are entered or none are; the response lists the new entries.
#[post("/api/tournaments/{id}/teams/import")]
async fn api_import_teams(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
    body: Bytes,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    let entries = match parse_roster(&body[..]) {
        Ok(entries) => entries,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.import_roster(path.id, &entries) {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => error_response(&e),
    }
}

/// Generate the bracket for the entered teams, replacing earlier matches (admin).
#[post("/api/tournaments/{id}/matches/generate")]
async fn api_generate_matches(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(e) = g.generate_bracket(path.id) {
        return error_response(&e);
    }
    matches_view(&g, path.id).unwrap_or_else(|e| error_response(&e))
}

#[get("/api/tournaments/{id}/matches")]
async fn api_list_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    matches_view(&g, path.id).unwrap_or_else(|e| error_response(&e))
}

/// Set the teams of a stored match, e.g. to advance winners into a later round (admin).
#[put("/api/tournaments/{id}/matches/{match_id}/teams")]
async fn api_assign_match_teams(
    state: AppState,
    session: Session,
    path: Path<TournamentMatchPath>,
    body: Json<AssignTeamsBody>,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.assign_match_teams(path.id, path.match_id, body.team1_id, body.team2_id) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(&e),
    }
}

/// Register every route on an app.
fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_login)
        .service(api_logout)
        .service(api_create_tournament)
        .service(api_list_tournaments)
        .service(api_get_tournament)
        .service(api_delete_tournament)
        .service(api_list_teams)
        .service(api_import_teams)
        .service(api_add_team)
        .service(api_remove_team)
        .service(api_generate_matches)
        .service(api_list_matches)
        .service(api_assign_match_teams);
}

fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(secure)
        .build()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let key = match &config.session_key {
        Some(bytes) => Key::from(bytes.as_slice()),
        None => {
            log::warn!("SESSION_KEY is not set, sessions will not survive a restart");
            Key::generate()
        }
    };

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let secure_cookies = config.secure_cookies;
    if !secure_cookies {
        log::warn!("SECURE_COOKIES is off, session cookies are also sent over plain HTTP");
    }

    let state = Data::new(RwLock::new(MatchStore::new()));
    let auth = Data::new(AdminAuth {
        password: config.admin_password.clone(),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(auth.clone())
            .wrap(session_middleware(key.clone(), secure_cookies))
            .wrap(middleware::Logger::default())
            .configure(routes)
    })
    .bind(bind)?
    .run()
    .await
}
