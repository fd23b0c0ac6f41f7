pub mod context_service;
pub mod event_service;
pub mod generation_service;
pub mod interest_search_service;
pub mod itinerary_planner_service;
pub mod place_extraction;
pub mod place_validation;
pub mod places_service;
pub mod weather_service;
