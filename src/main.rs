mod config;
mod controller;
mod convert;
mod scene;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

use controller::{Controller, FieldId, PageId, Summary, UiUpdate};
use scene::{AnimationParams, Scene, SphereView};

const CONFIG_PATH: &str = "gradeviz.json";

/// Owning application context; every handler and the render tick go through
/// this instead of touching module-level state.
struct App {
    controller: Controller,
    scene: Scene,
}

type SharedApp = Arc<RwLock<App>>;

#[derive(Deserialize)]
struct InputEvent {
    field: FieldId,
    value: String,
}

#[derive(Serialize)]
struct FrameResponse {
    params: AnimationParams,
    spheres: Vec<SphereView>,
}

async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn input(
    State(app): State<SharedApp>,
    Json(event): Json<InputEvent>,
) -> Result<Json<UiUpdate>, StatusCode> {
    let mut app = app.write().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    debug!(field = ?event.field, value = %event.value, "input changed");
    Ok(Json(app.controller.on_input_changed(event.field, &event.value)))
}

async fn summary(State(app): State<SharedApp>) -> Result<Json<Summary>, StatusCode> {
    let mut app = app.write().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    match app.controller.on_navigate(PageId::Summary) {
        Some(view) => Ok(Json(view)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn frame(State(app): State<SharedApp>) -> Result<Json<FrameResponse>, StatusCode> {
    let app = app.read().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(FrameResponse {
        params: app.controller.params(),
        spheres: app.scene.snapshot(),
    }))
}

/// Fixed-rate render tick: reads the shared parameters, recolors when a new
/// yearly value landed, and advances every sphere.
fn spawn_ticker(app: SharedApp, interval_ms: u64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
        loop {
            ticker.tick().await;
            let Ok(mut app) = app.write() else {
                break;
            };
            let params = app.controller.params();
            if let Some(yearly) = app.controller.take_recolor() {
                app.scene.recolor(yearly);
            }
            app.scene.advance(&params);
        }
    });
}

#[tokio::main]
async fn main() {
    let fmt_layer = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(LevelFilter::INFO)
        .init();

    let cfg = match config::Config::load(Path::new(CONFIG_PATH)) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };
    let addr: SocketAddr = match cfg.listen.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("bad listen address {:?}: {e}", cfg.listen);
            std::process::exit(1);
        }
    };

    let app = Arc::new(RwLock::new(App {
        controller: Controller::new(),
        scene: Scene::new(cfg.sphere_count),
    }));
    spawn_ticker(app.clone(), cfg.frame_interval_ms);

    let router = Router::new()
        .route("/", get(index))
        .route("/api/input", post(input))
        .route("/api/summary", get(summary))
        .route("/api/frame", get(frame))
        .with_state(app);

    info!("serving on http://{addr}");
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, router).await {
        error!("server: {e}");
    }
}

const INDEX_HTML: &str = r##"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Grade Visualizer</title>
    <style>
      html, body { margin: 0; padding: 0; height: 100%; background: #0b0c10; color: #e6e6e6; font-family: "Segoe UI", sans-serif; overflow: hidden; }
      canvas { display: block; }
      #panel { position: absolute; top: 12px; left: 12px; width: 320px; background: rgba(10,12,16,0.9); padding: 12px; border: 1px solid #2a2f36; border-radius: 10px; }
      .section { margin-top: 12px; padding-top: 10px; border-top: 1px solid #1f2630; }
      .section:first-of-type { margin-top: 8px; padding-top: 0; border-top: none; }
      .section-title { font-size: 11px; text-transform: uppercase; letter-spacing: 0.12em; color: #9aa3ad; margin-bottom: 6px; }
      .row { display: flex; align-items: center; gap: 6px; margin-top: 6px; }
      .row label { font-size: 12px; color: #a7b0ba; min-width: 80px; }
      input { background: #0f141b; color: #e6e6e6; border: 1px solid #2a2f36; border-radius: 6px; padding: 4px 6px; font-size: 12px; width: 70px; }
      .error { display: none; color: #f87171; font-size: 11px; }
      .result { font-size: 12px; color: #c9d1d9; }
      button { background: #1a2736; color: #e6e6e6; border: 1px solid #3c6a9e; border-radius: 6px; padding: 6px 10px; font-size: 12px; cursor: pointer; margin-top: 8px; }
      #summary { display: none; }
      #barTrack { margin-top: 6px; height: 8px; background: #1f2630; border-radius: 4px; overflow: hidden; }
      #bar { height: 100%; width: 0; background: #3c6a9e; }
      #bandMessage { margin-top: 6px; font-size: 13px; }
    </style>
  </head>
  <body>
    <div id="panel">
      <div class="section">
        <div class="section-title">Grade point</div>
        <div class="row">
          <label for="gradePoint">GP (0-10)</label>
          <input id="gradePoint" type="text" />
          <span id="gradeError" class="error">0 to 10 only</span>
        </div>
        <div class="row result">Percentage: <span id="percentage">--</span></div>
      </div>
      <div class="section">
        <div class="section-title">Yearly</div>
        <div class="row">
          <label for="oddTerm">Odd term</label>
          <input id="oddTerm" type="text" />
          <span id="oddError" class="error">0 to 10 only</span>
        </div>
        <div class="row">
          <label for="evenTerm">Even term</label>
          <input id="evenTerm" type="text" />
          <span id="evenError" class="error">0 to 10 only</span>
        </div>
        <div class="row result">Yearly GP: <span id="yearlyGrade">--</span></div>
        <div class="row result">Yearly %: <span id="yearlyPercentage">--</span></div>
      </div>
      <div class="section">
        <button id="showSummary">Summary</button>
        <div id="summary">
          <div class="row result">Percentage: <span id="sumPercentage">--</span></div>
          <div class="row result">Yearly GP: <span id="sumYearly">--</span></div>
          <div class="row result">Yearly %: <span id="sumYearlyPct">--</span></div>
          <div id="barTrack"><div id="bar"></div></div>
          <div id="bandMessage"></div>
        </div>
      </div>
    </div>
    <script type="importmap">
      { "imports": { "three": "https://unpkg.com/three@0.160.0/build/three.module.js" } }
    </script>
    <script type="module">
      import * as THREE from "three";

      const PLACEHOLDER = "--";
      const ERROR_IDS = { grade: "gradeError", odd_term: "oddError", even_term: "evenError" };

      function setText(id, value) {
        document.getElementById(id).textContent = value ?? PLACEHOLDER;
      }

      async function send(field, value) {
        const res = await fetch("/api/input", {
          method: "POST",
          headers: { "Content-Type": "application/json" },
          body: JSON.stringify({ field, value }),
        });
        const update = await res.json();
        document.getElementById(ERROR_IDS[update.field]).style.display =
          update.show_error ? "inline" : "none";
        setText("percentage", update.percentage);
        setText("yearlyGrade", update.yearly_grade);
        setText("yearlyPercentage", update.yearly_percentage);
      }

      function bind(id, field) {
        document.getElementById(id).addEventListener("input", (e) => send(field, e.target.value));
      }
      bind("gradePoint", "grade");
      bind("oddTerm", "odd_term");
      bind("evenTerm", "even_term");

      document.getElementById("showSummary").addEventListener("click", async () => {
        const s = await (await fetch("/api/summary")).json();
        document.getElementById("summary").style.display = "block";
        setText("sumPercentage", s.percentage?.toFixed(2));
        setText("sumYearly", s.yearly_grade?.toFixed(2));
        setText("sumYearlyPct", s.yearly_percentage?.toFixed(2));
        document.getElementById("bar").style.width = Math.max(s.bar_width ?? 0, 0) + "%";
        const msg = document.getElementById("bandMessage");
        msg.textContent = s.band ? s.band.message : "";
        if (s.band) msg.style.color = s.band.color;
      });

      const scene = new THREE.Scene();
      const camera = new THREE.PerspectiveCamera(60, innerWidth / innerHeight, 0.1, 100);
      camera.position.set(0, 4, 14);
      camera.lookAt(0, 0, 0);
      const renderer = new THREE.WebGLRenderer({ antialias: true });
      renderer.setSize(innerWidth, innerHeight);
      document.body.appendChild(renderer.domElement);
      const light = new THREE.DirectionalLight(0xffffff, 1.2);
      light.position.set(5, 8, 6);
      scene.add(light);
      scene.add(new THREE.AmbientLight(0x404040));

      const meshes = [];
      function ensureMeshes(n) {
        while (meshes.length < n) {
          const mesh = new THREE.Mesh(
            new THREE.SphereGeometry(0.6, 24, 24),
            new THREE.MeshStandardMaterial()
          );
          meshes.push(mesh);
          scene.add(mesh);
        }
      }

      async function tick() {
        try {
          const frame = await (await fetch("/api/frame")).json();
          ensureMeshes(frame.spheres.length);
          frame.spheres.forEach((s, i) => {
            const mesh = meshes[i];
            mesh.position.set(...s.position);
            mesh.rotation.y = s.spin;
            mesh.rotation.x = s.spin * 0.5;
            mesh.material.color.setRGB(...s.color);
          });
        } catch (_) {
          // server not reachable; keep drawing the last frame
        }
        renderer.render(scene, camera);
        requestAnimationFrame(tick);
      }
      tick();

      addEventListener("resize", () => {
        camera.aspect = innerWidth / innerHeight;
        camera.updateProjectionMatrix();
        renderer.setSize(innerWidth, innerHeight);
      });
    </script>
  </body>
</html>
"##;
