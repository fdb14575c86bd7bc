// Assistant-side copy for the interview dialogue.

use crate::interview::models::Step;

pub const GREETING: &str = "👋 Hello there! I'm your **TalentScout AI Assistant**. \
I'm here to gather some quick information and then ask a few technical questions based on your skills. \
Let's make this quick and smooth! ✨";

pub const TECH_STACK_PROMPT: &str = "🛠️ Tell me about your primary tech stack or key skills, \
separated by commas (e.g., Python, React, AWS, SQL). This helps me tailor questions for you!";

pub const CLOSING: &str = "Thank you for your time and for sharing your information! \
Your details and answers have been successfully recorded. \
We'll be in touch very soon regarding the next steps in our hiring process. Have a fantastic day! 😊👋";

pub const FALLBACK: &str = "I'm sorry, I didn't quite catch that. \
Could you please rephrase or tell me how I can assist you? 🤔";

pub const ANSWER_ALL: &str = "Please answer all the technical questions before submitting. 🙏";

/// Acknowledgment after a profile field is accepted. `value` is the trimmed input.
pub fn acknowledge(step: Step, value: &str) -> String {
    match step {
        Step::AskName => format!("Nice to meet you, **{value}**! 👋"),
        Step::AskEmail => "Got it! Your email has been recorded. 📧".to_string(),
        Step::AskPhone => "Thanks for your phone number! 📞".to_string(),
        Step::AskExperience => {
            format!("Okay, **{value} years** of experience. That's helpful! 👍")
        }
        Step::AskPosition => format!("Understood, you're interested in **{value}** roles. 🚀"),
        Step::AskLocation => format!(
            "Great! Your location is **{value}**. 📍 Now, let's talk tech!\n\n{TECH_STACK_PROMPT}"
        ),
        _ => String::new(),
    }
}

pub fn tech_stack_summary(stack: &[String]) -> String {
    format!("My tech stack includes: {}", stack.join(", "))
}

pub fn question_listing(questions: &[String]) -> String {
    let mut msg = String::from(
        "Excellent! Here are a few technical questions for you. \
         Please answer them in detail. Take your time! 👇",
    );
    for (idx, q) in questions.iter().enumerate() {
        msg.push_str(&format!("\n\n**Q{}.** {}", idx + 1, q));
    }
    msg
}

/// The single user entry that closes the answers step.
pub fn consolidated_answers<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    let mut msg = String::from("Here are my answers to the technical questions: \n\n");
    for (idx, (question, answer)) in pairs.enumerate() {
        msg.push_str(&format!(
            "**Q{n}:** {question}\n**A:** {answer}\n\n",
            n = idx + 1
        ));
    }
    msg
}
