use quiz_core::model::QuizRequest;

/// Instruction text asking for `request.count()` questions in the parseable format.
#[must_use]
pub fn build_prompt(request: &QuizRequest) -> String {
    let count = request.count();
    let topic = request.topic();
    format!(
        "Generate exactly {count} multiple-choice questions on the topic \"{topic}\".
Follow this exact format for EACH question, with exactly one empty line between questions:

Q1: <question>
A. <option A>
B. <option B>
C. <option C>
D. <option D>
Answer: <letter>
Explanation: <explanation>

Repeat this format {count} times, numbering the questions Q1:, Q2:, and so on.
The answer must be a single letter: A, B, C or D.
Do not include any other text or formatting."
    )
}
