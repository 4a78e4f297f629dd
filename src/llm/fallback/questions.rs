//! 话题关键词驱动的访谈问题模板

/// 生成上下文相关的访谈问题，每行一个
pub fn generate(topic: &str) -> String {
    let topic_lower = topic.to_lowercase();
    let topic_keywords: Vec<&str> = topic_lower.split_whitespace().collect();

    let mut questions = vec![
        format!(
            "What challenges do you currently face when working with {}?",
            topic
        ),
        format!("How do you typically approach {} in your work?", topic),
        format!(
            "What would an ideal solution for {} look like to you?",
            topic
        ),
        format!("What tools or methods do you use for {}?", topic),
        format!(
            "What aspect of {} do you find most frustrating or time-consuming?",
            topic
        ),
    ];

    // 按话题补充针对性问题
    if contains_any(
        &topic_keywords,
        &["ai", "artificial", "intelligence", "machine", "learning"],
    ) {
        questions.push(format!(
            "How do you see {} evolving in your industry?",
            topic
        ));
        questions.push(format!(
            "What ethical considerations around {} concern you most?",
            topic
        ));
    }

    if contains_any(
        &topic_keywords,
        &["development", "software", "code", "programming"],
    ) {
        questions.push(format!(
            "How has {} changed your development workflow?",
            topic
        ));
        questions.push(format!(
            "What learning resources for {} do you recommend?",
            topic
        ));
    }

    if contains_any(&topic_keywords, &["chip", "hardware", "semiconductor"]) {
        questions.push(format!(
            "How do you evaluate the performance impact of {}?",
            topic
        ));
        questions.push(format!(
            "What are the key technical specifications you consider for {}?",
            topic
        ));
    }

    questions.join("\n")
}

fn contains_any(keywords: &[&str], candidates: &[&str]) -> bool {
    keywords.iter().any(|word| candidates.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_questions() {
        let text = generate("team rituals");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|line| line.ends_with('?')));
        assert!(lines[0].contains("team rituals"));
    }

    #[test]
    fn test_topic_specific_additions() {
        let ai = generate("ai coding assistants");
        assert_eq!(ai.lines().count(), 7);
        assert!(ai.contains("ethical considerations"));

        let hardware = generate("chip design");
        assert_eq!(hardware.lines().count(), 7);
        assert!(hardware.contains("technical specifications"));

        let software = generate("software development practices");
        assert_eq!(software.lines().count(), 7);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(generate("observability"), generate("observability"));
    }
}
