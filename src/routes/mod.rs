pub mod route_planner_routes;

pub use route_planner_routes::create_router;
