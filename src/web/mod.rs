// ============================================================
// Layer 1 — Web Presentation Layer
// ============================================================
// The second front door next to the CLI. Handlers stay thin:
// parse input, call the LoadedModel, render or serialize.
//
//   server.rs — actix-web routes, shared state, status mapping
//   pages.rs  — minijinja rendering of the form page

/// Routes and server startup
pub mod server;

/// HTML rendering
pub mod pages;
