//! Single binary web server: tournaments kept in memory, results computed on request.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, INACTIVITY_HOURS (tournament expiry, default 12).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tournament_results::{
    import::{read_match_records, write_standings},
    results_for, InMemoryStore, MatchId, RawMatchRecord, ResultsError, Tournament,
    TournamentFormat, TournamentId, TournamentOptions,
};

/// Store plus last activity per tournament (for auto-cleanup).
#[derive(Default)]
struct AppData {
    store: InMemoryStore,
    last_activity: HashMap<TournamentId, Instant>,
}

type AppState = Data<RwLock<AppData>>;

struct ServerConfig {
    host: String,
    port: u16,
    inactivity_timeout: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let hours: u64 = std::env::var("INACTIVITY_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(12);
        Self {
            host,
            port,
            inactivity_timeout: Duration::from_secs(hours * 3600),
        }
    }
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    /// "Tables" or "Knockout".
    format: String,
    #[serde(default)]
    options: TournamentOptions,
}

#[derive(Deserialize)]
struct FixturesBody {
    teams: Vec<String>,
}

#[derive(Deserialize)]
struct ScoreBody {
    score_a: u32,
    score_b: u32,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_response(e: &ResultsError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    if e.is_validation() {
        HttpResponse::BadRequest().json(body)
    } else {
        HttpResponse::NotFound().json(body)
    }
}

/// Run `f` under the write lock and refresh the tournament's activity time.
fn with_store<T>(
    state: &AppState,
    id: TournamentId,
    f: impl FnOnce(&mut InMemoryStore) -> Result<T, ResultsError>,
) -> Result<T, HttpResponse> {
    let mut g = state
        .write()
        .map_err(|_| HttpResponse::InternalServerError().body("lock error"))?;
    let result = f(&mut g.store);
    if g.store.tournament(id).is_ok() {
        g.last_activity.insert(id, Instant::now());
    }
    result.map_err(|e| error_response(&e))
}

/// Respond with the tournament after a successful mutation.
fn tournament_response(result: Result<Tournament, HttpResponse>) -> HttpResponse {
    match result {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(resp) => resp,
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-results",
    })
}

/// Create a new tournament (returns it with id).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let format: TournamentFormat = match body.format.parse() {
        Ok(f) => f,
        Err(e) => return error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let created = g
        .store
        .create_tournament(body.name.as_str(), format, body.options)
        .cloned();
    match created {
        Ok(t) => {
            g.last_activity.insert(t.id, Instant::now());
            HttpResponse::Ok().json(t)
        }
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let id = path.id;
    tournament_response(with_store(&state, id, |store| store.tournament(id).cloned()))
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let id = path.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.last_activity.remove(&id);
    match g.store.remove(id) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

/// Generate opening fixtures from a team list (tournament must have no matches yet).
#[post("/api/tournaments/{id}/fixtures")]
async fn api_generate_fixtures(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<FixturesBody>,
) -> HttpResponse {
    let id = path.id;
    tournament_response(with_store(&state, id, |store| {
        store.generate_fixtures(id, &body.teams, &mut rand::thread_rng())?;
        store.tournament(id).cloned()
    }))
}

/// Add one match record.
#[post("/api/tournaments/{id}/matches")]
async fn api_add_match(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RawMatchRecord>,
) -> HttpResponse {
    let id = path.id;
    tournament_response(with_store(&state, id, |store| {
        store.add_match(id, body.into_inner())?;
        store.tournament(id).cloned()
    }))
}

/// Import match records from a CSV body. All rows are validated before any is added.
#[post("/api/tournaments/{id}/matches/import")]
async fn api_import_matches(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    let id = path.id;
    tournament_response(with_store(&state, id, |store| {
        let records = read_match_records(body.as_bytes())?;
        store.import_matches(id, records)?;
        store.tournament(id).cloned()
    }))
}

#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_record_score(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let (id, match_id) = (path.id, path.match_id);
    tournament_response(with_store(&state, id, |store| {
        store.record_score(id, match_id, body.score_a, body.score_b)?;
        store.tournament(id).cloned()
    }))
}

#[delete("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_clear_score(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    let (id, match_id) = (path.id, path.match_id);
    tournament_response(with_store(&state, id, |store| {
        store.clear_score(id, match_id)?;
        store.tournament(id).cloned()
    }))
}

/// Store next-round knockout matches whose teams are decided.
#[post("/api/tournaments/{id}/bracket/advance")]
async fn api_advance_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let id = path.id;
    tournament_response(with_store(&state, id, |store| {
        store.advance_bracket(id)?;
        store.tournament(id).cloned()
    }))
}

/// Standings (Tables) or bracket rounds (Knockout).
#[get("/api/tournaments/{id}/results")]
async fn api_results(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let id = path.id;
    match with_store(&state, id, |store| results_for(store, id)) {
        Ok(results) => HttpResponse::Ok().json(serde_json::json!({
            "format": results.format(),
            "leader": results.leader(),
            "results": results,
        })),
        Err(resp) => resp,
    }
}

#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let id = path.id;
    let csv = with_store(&state, id, |store| {
        let results = results_for(store, id)?;
        let standings = results.require_standings()?;
        let mut out = Vec::new();
        write_standings(&mut out, standings)?;
        Ok(out)
    });
    match csv {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(bytes),
        Err(resp) => resp,
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state: AppState = Data::new(RwLock::new(AppData::default()));

    // Background task: every 30 minutes, remove tournaments inactive past the timeout
    let state_cleanup = state.clone();
    let timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let AppData {
                store,
                last_activity,
            } = &mut *g;
            let removed = store.retain(|t| {
                last_activity
                    .get(&t.id)
                    .is_some_and(|seen| seen.elapsed() < timeout)
            });
            last_activity.retain(|_, seen| seen.elapsed() < timeout);
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_generate_fixtures)
            .service(api_add_match)
            .service(api_import_matches)
            .service(api_record_score)
            .service(api_clear_score)
            .service(api_advance_bracket)
            .service(api_results)
            .service(api_standings_csv)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
