//! Prompt construction for the completion-service enhancement path.
//!
//! Each engine issues at most one completion request per operation, built
//! here so wording stays in one place.

/// Ask for a bare flight number, or the NONE sentinel when there is none.
pub fn extraction_prompt(query: &str) -> String {
    format!(
        "Extract the flight number from the following user query.\n\
         Respond with ONLY the flight number, or 'NONE' if no flight number is found.\n\
         \n\
         User query: {query}\n\
         \n\
         Flight number:"
    )
}

/// Ask for a short factual answer grounded in the supplied flight record.
pub fn answer_prompt(query: &str, flight_json: &str) -> String {
    format!(
        "Generate a concise answer to the user's query about a flight based on the flight data provided.\n\
         The response should be factual and address the specific question asked.\n\
         \n\
         User query: {query}\n\
         \n\
         Flight data: {flight_json}\n\
         \n\
         Answer:"
    )
}

/// Ask for a categorization judgment in the exact JSON shape the
/// categorizer strict-parses.
pub fn categorization_prompt(transcript: &str) -> String {
    format!(
        "You are an assistant that categorizes airline call center conversations.\n\
         Categories are: Flight Booking, Flight Cancellation, Flight Rescheduling,\n\
         Baggage Issue, Complaint, Seat Change, and General Inquiry.\n\
         \n\
         Categorize the following call transcript and extract key details.\n\
         Respond with ONLY a JSON object of this exact shape:\n\
         {{\"category\": \"<one of the categories>\",\n\
          \"details\": {{\"flight_numbers\": [\"AI123\"],\n\
                       \"customer_name\": \"<name or Unknown>\",\n\
                       \"resolution_status\": \"Resolved\" or \"Pending\",\n\
                       \"call_summary\": \"<one sentence>\"}}}}\n\
         \n\
         Transcript: {transcript}\n\
         \n\
         Output:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_prompt_contains_query_and_sentinel() {
        let prompt = extraction_prompt("where is my plane");
        assert!(prompt.contains("where is my plane"));
        assert!(prompt.contains("'NONE'"));
    }

    #[test]
    fn test_answer_prompt_embeds_record() {
        let prompt = answer_prompt("status of AI123?", "{\"flight_number\":\"AI123\"}");
        assert!(prompt.contains("status of AI123?"));
        assert!(prompt.contains("\"flight_number\":\"AI123\""));
    }

    #[test]
    fn test_categorization_prompt_lists_all_categories() {
        let prompt = categorization_prompt("Agent: hello");
        for label in [
            "Flight Booking",
            "Flight Cancellation",
            "Flight Rescheduling",
            "Baggage Issue",
            "Complaint",
            "Seat Change",
            "General Inquiry",
        ] {
            assert!(prompt.contains(label), "missing {label}");
        }
    }
}
