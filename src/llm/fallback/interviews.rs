//! 职业线索驱动的访谈回答模板池
//!
//! 这是回退路径中唯一带随机性的函数：输出在固定池内随机取样。

use rand::seq::IndexedRandom;

const ENGINEER_RESPONSES: &[&str] = &[
    "From my technical experience, this requires careful architecture planning. We usually start with scalability considerations and work our way through performance optimization.",
    "The biggest challenge I've faced is balancing code quality with delivery speed. Our team has found success using automated testing and CI/CD pipelines.",
    "We've implemented solutions using microservices, which works well for our distributed team. The key is having clear API contracts and proper monitoring.",
    "The tools we use include industry standards like Docker and Kubernetes, but we often need custom solutions for specific requirements.",
];

const MANAGER_RESPONSES: &[&str] = &[
    "From a business perspective, this needs to align with our strategic goals. We typically start by validating user needs before technical implementation.",
    "Our approach involves understanding market requirements first, then working with engineering to find the best solution within budget and timeline constraints.",
    "The main challenge is balancing stakeholder expectations with technical realities. Clear communication and regular check-ins help manage this effectively.",
    "We prioritize features based on user impact and business value. Our roadmap focuses on delivering incremental value while building toward bigger goals.",
];

const HARDWARE_RESPONSES: &[&str] = &[
    "In hardware design, power efficiency is critical. We spend significant time optimizing for thermal constraints while maintaining performance targets.",
    "Our design process involves extensive simulation before any physical prototyping. This helps catch issues early and reduces development costs.",
    "From an architecture perspective, we need to consider manufacturing constraints from day one. What looks good on paper might not be feasible at scale.",
    "We focus on both innovation and manufacturability. The best design is useless if it can't be produced cost-effectively.",
];

const GENERAL_RESPONSES: &[&str] = &[
    "In our industry, this represents both an opportunity and a challenge. Success requires careful planning and stakeholder alignment.",
    "We've found that gradual implementation works better than big-bang approaches. Getting early wins helps build momentum for larger changes.",
    "The practical aspects require balancing multiple priorities. We focus on high-impact areas first and iterate based on feedback.",
    "Our experience has taught us to start small and scale gradually. This approach reduces risk and allows for course corrections.",
];

/// 从匹配的回答池中随机取一条
pub fn generate(prompt: &str) -> String {
    let pool = response_pool(prompt);
    pool.choose(&mut rand::rng())
        .copied()
        .unwrap_or(pool[0])
        .to_string()
}

/// 根据prompt中的职业线索选择回答池
pub fn response_pool(prompt: &str) -> &'static [&'static str] {
    let prompt_lower = prompt.to_lowercase();

    if prompt_lower.contains("engineer") || prompt_lower.contains("developer") {
        ENGINEER_RESPONSES
    } else if prompt_lower.contains("manager") || prompt_lower.contains("product") {
        MANAGER_RESPONSES
    } else if prompt_lower.contains("chip") || prompt_lower.contains("hardware") {
        HARDWARE_RESPONSES
    } else {
        GENERAL_RESPONSES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_selection() {
        assert_eq!(
            response_pool("You are Jordan, a software engineer..."),
            ENGINEER_RESPONSES
        );
        assert_eq!(
            response_pool("You are Taylor, a product manager..."),
            MANAGER_RESPONSES
        );
        assert_eq!(
            response_pool("You are Sarah, a chip design expert..."),
            HARDWARE_RESPONSES
        );
        assert_eq!(response_pool("You are Jamie, a nurse..."), GENERAL_RESPONSES);
    }

    #[test]
    fn test_generate_stays_in_pool() {
        let prompt = "You are Jordan Kim, a 29-year-old Senior Software Engineer...";
        for _ in 0..20 {
            let answer = generate(prompt);
            assert!(ENGINEER_RESPONSES.contains(&answer.as_str()));
        }
    }
}
