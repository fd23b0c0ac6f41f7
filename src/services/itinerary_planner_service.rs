use pulldown_cmark::{html, Event as MdEvent, Options, Parser};
use std::{sync::Arc, time::Instant};

use crate::error::Result;
use crate::models::plan::{PlanOutcome, PlanRequest};
use crate::services::context_service::{ContextAggregator, TripContext};
use crate::services::generation_service::TextGenerator;
use crate::services::place_extraction::extract_candidates;
use crate::services::place_validation::{ValidationStrategy, Validator};

pub fn build_prompt(request: &PlanRequest, context: &TripContext) -> String {
    format!(
        "Plan a 1-day itinerary in **{city}** for **{date}** with:\n\n\
         - Budget: {budget}\n\
         - Preferences: {preferences}\n\
         - Pace: {pace}\n\n\
         Context:\n\
         {weather}\n\
         {events}\n\
         {interests}\n\
         Include:\n\
         - Brief intro with weather\n\
         - Timeline with places to visit\n\
         - Nearby events (if any)\n\
         - Local food suggestions\n\
         - Estimated costs (tickets, food, transport)\n\
         - Total cost at the end\n",
        city = request.city,
        date = request.date,
        budget = request.budget,
        preferences = request.preference_text(),
        pace = request.pace,
        weather = context.weather_summary(&request.city),
        events = context.event_summary(),
        interests = context.interest_summary(),
    )
}

/// Renders generated markdown to HTML. Single newlines become `<br />`.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        MdEvent::SoftBreak => MdEvent::HardBreak,
        other => other,
    });

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

pub struct ItineraryPlanner {
    generator: Arc<dyn TextGenerator>,
    context: ContextAggregator,
    validator: Arc<dyn Validator>,
}

impl ItineraryPlanner {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        context: ContextAggregator,
        validator: Arc<dyn Validator>,
    ) -> Self {
        Self {
            generator,
            context,
            validator,
        }
    }

    pub fn validation_strategy(&self) -> ValidationStrategy {
        self.validator.strategy()
    }

    /// Gathers context, generates the plan and validates the places it names.
    ///
    /// Only the generation call can fail; context and validation degrade.
    pub async fn plan(&self, request: &PlanRequest) -> Result<PlanOutcome> {
        let route_start = Instant::now();

        let context_start = Instant::now();
        let context = self
            .context
            .gather(&request.city, &request.date, &request.preferences)
            .await;
        log::info!(
            "Context fetch time: {:.2} seconds",
            context_start.elapsed().as_secs_f64()
        );

        let prompt = build_prompt(request, &context);

        let generation_start = Instant::now();
        let plan_markdown = self.generator.generate(&prompt).await?;
        log::info!(
            "LLM generation time: {:.2} seconds",
            generation_start.elapsed().as_secs_f64()
        );

        let extraction_start = Instant::now();
        let candidates = extract_candidates(&plan_markdown);
        log::info!(
            "Place extraction time: {:.2} seconds ({} candidates)",
            extraction_start.elapsed().as_secs_f64(),
            candidates.len()
        );

        let validation_start = Instant::now();
        let outcome = self
            .validator
            .validate_candidates(candidates, &request.city)
            .await;
        log::info!(
            "Place validation ({}) time: {:.2} seconds",
            self.validator.strategy(),
            validation_start.elapsed().as_secs_f64()
        );

        let report = outcome.report();
        log::info!(
            "Place validation accuracy for {}: {:.2}% ({}/{})",
            request.city,
            report.accuracy_percent(),
            report.validated_count,
            report.raw_count
        );

        let plan_html = render_markdown(&plan_markdown);
        log::info!(
            "Total plan response time: {:.2} seconds",
            route_start.elapsed().as_secs_f64()
        );

        Ok(PlanOutcome {
            plan_markdown,
            plan_html,
            places: outcome.validated,
            report,
        })
    }
}
