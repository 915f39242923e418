//! Prompt Builder: renders job metadata into the question generation prompt.

use crate::models::interview::INTERVIEW_CATEGORIES;

/// Question generation prompt template.
/// Replace: {job_title}, {job_description}, {duration}, {type},
///          {question_count}, {categories}
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"You are an expert technical interviewer.
Based on the following inputs, generate a well-structured list of high-quality interview questions:

Job Title: {job_title}
Job Description: {job_description}
Interview Duration: {duration}
Interview Type: {type}

Your task:
Analyze the job description to identify key responsibilities, required skills, and expected experience.
Generate a list of interview questions depending on interview duration.
Adjust the number and depth of questions to match the interview duration.
Generate around {question_count} interview questions suitable for a {duration} interview for the role of {job_title}.
Ensure the questions match the tone and structure of a real-life {type} interview.

Format your response as JSON only, with no text before or after it:
{
  "interviewQuestions": [
    {
      "question": "",
      "type": "{categories}"
    }
  ]
}

The goal is to create a structured, relevant, and time-optimized interview plan for a {job_title} role."#;

/// Questions requested when the duration cannot be read or exceeds the last breakpoint.
pub const MAX_QUESTION_COUNT: u32 = 25;

/// Advisory question count for an interview of `minutes` length.
pub fn question_count(minutes: u32) -> u32 {
    match minutes {
        0..=15 => 7,
        16..=30 => 15,
        _ => MAX_QUESTION_COUNT,
    }
}

/// Reads the leading integer of a duration such as `"30 min"`.
pub fn parse_duration_minutes(duration: &str) -> Option<u32> {
    let digits: String = duration
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Advisory question count for a free-text duration.
pub fn question_count_for(duration: &str) -> u32 {
    parse_duration_minutes(duration)
        .map(question_count)
        .unwrap_or(MAX_QUESTION_COUNT)
}

/// Job metadata the prompt is rendered from.
#[derive(Debug, Clone)]
pub struct JobSpec<'a> {
    pub job_position: &'a str,
    pub job_description: &'a str,
    pub duration: &'a str,
    pub interview_types: &'a [String],
}

/// Fills the template in one pass. Substituted values are copied as-is and
/// never rescanned, so braces in user text survive. Callers validate fields first.
pub fn render_question_prompt(job: &JobSpec<'_>) -> String {
    let count = question_count_for(job.duration).to_string();
    let types = job.interview_types.join(", ");
    let categories = INTERVIEW_CATEGORIES.join("/");
    let values: [(&str, &str); 6] = [
        ("{job_title}", job.job_position),
        ("{job_description}", job.job_description),
        ("{duration}", job.duration),
        ("{type}", types.as_str()),
        ("{question_count}", count.as_str()),
        ("{categories}", categories.as_str()),
    ];

    let mut prompt = String::with_capacity(QUESTION_PROMPT_TEMPLATE.len() * 2);
    let mut rest = QUESTION_PROMPT_TEMPLATE;
    while let Some(start) = rest.find('{') {
        prompt.push_str(&rest[..start]);
        rest = &rest[start..];
        match values.iter().find(|(token, _)| rest.starts_with(*token)) {
            Some((token, value)) => {
                prompt.push_str(value);
                rest = &rest[token.len()..];
            }
            None => {
                prompt.push('{');
                rest = &rest[1..];
            }
        }
    }
    prompt.push_str(rest);
    prompt
}
