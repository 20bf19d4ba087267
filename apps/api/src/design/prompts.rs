// Prompts for the free-text design flow. No output format is imposed.

use crate::layout::models::LayoutRequest;
pub use crate::llm_client::prompts::DESIGNER_PERSONA as DESIGN_SYSTEM;

pub fn build_design_prompt(request: &LayoutRequest) -> String {
    let people = match request.occupant_count {
        1 => "1 person".to_string(),
        n => format!("{n} people"),
    };

    format!(
        "Design a tiny home for:\n\
         - {people}\n\
         - Budget: {budget}\n\
         - Climate: {climate}\n\
         - Needs: {needs}\n\
         - Style: {style}\n",
        budget = request.budget,
        climate = request.climate.as_deref().unwrap_or("California"),
        needs = request.needs,
        style = request.style.as_deref().unwrap_or("Practical"),
    )
}
