//! Embedded fallback prompts
//!
//! These are compiled into the binary and used when template files are not
//! found on disk.

/// System prompt for commentary generation
pub const SYSTEM: &str = r#"You are a professional portfolio manager writing the Market Context section of a quarterly portfolio commentary for institutional clients.

Your task is to write a comprehensive Market Context section that:
- Provides a clear overview of market conditions during the specified period
- Explains key market drivers and economic factors
- Discusses sector performance and market trends
- Uses professional, analytical language suitable for institutional investors
- Focuses on facts and analysis, not speculation
- Maintains a neutral, objective tone

The Market Context should be informative, well-structured, and demonstrate deep market understanding. Keep the commentary relevant to the strategy and the period.
Commentary should be around {{word_count}} words."#;

/// Commentary generation prompt
pub const COMMENTARY: &str = r#"Generate a Market Context section for the {{strategy_name}} portfolio commentary for {{quarter}} {{year}}.

Strategy Details:
- Strategy: {{strategy_name}}
- Benchmark: {{benchmark}}
- Period: {{quarter}} {{year}}

Market Research Data:
{{market_research}}
{{#if additional_data}}
Additional Data:
{{additional_data}}
{{/if}}
{{#if feedback}}
Previous Feedback:
{{feedback}}
{{/if}}

Please write a comprehensive Market Context section that covers:

1. **Economic Overview**: Key economic indicators, Federal Reserve policy, inflation trends, and GDP growth
2. **Market Performance**: Major index performance, volatility levels, and market sentiment
3. **Sector Analysis**: Sector rotation, performance leaders and laggards, and key themes
4. **Global Factors**: International market conditions, geopolitical events, and currency impacts
5. **Market Drivers**: Key events, earnings trends, and factors that influenced market direction

Guidelines:
- Write in a professional, analytical tone
- Use specific data points and percentages where relevant
- Focus on what happened during the period, not predictions
- Keep the content factual and objective
- Structure the content with clear headings and bullet points
- Aim for around {{word_count}} words of substantive content
{{#if custom_instructions}}

Additional Instructions: {{custom_instructions}}
{{/if}}"#;

/// Quality review prompt
///
/// The response must follow the line-oriented micro-format parsed by
/// `quality::review`: QUALITY_SCORE / SHORT_FEEDBACK / MISSING_DATA_PROMPTS.
pub const REVIEW: &str = r#"Please review this Market Context section for {{strategy_name}}:

{{commentary}}

Evaluate the commentary and provide a quality score, short feedback, and specific prompts for missing data.

IMPORTANT: Be generous with scoring. A well-structured, professional commentary with good market analysis should score 8.5-9.5. Only score below 8.0 if there are significant issues.

Provide your response in the following EXACT format:

QUALITY_SCORE: [Score out of 10]
SHORT_FEEDBACK: [Brief feedback on strengths and areas for improvement - keep it concise]
MISSING_DATA_PROMPTS: [3-5 specific prompts to gather missing data that would improve the commentary]

For MISSING_DATA_PROMPTS, create specific, actionable prompts such as:
- "What was the exact S&P 500 performance percentage for the period?"
- "What were the specific technology sector performance metrics vs benchmark?"
- "What percentage of index companies beat earnings expectations?"
- "What was the VIX average for the period?"

Example:
QUALITY_SCORE: 8.5
SHORT_FEEDBACK: Good structure and professional tone. Missing specific data points and sector performance details. Needs more quantitative metrics.
MISSING_DATA_PROMPTS: 1) What was the exact S&P 500 performance percentage for the period? 2) What were the specific technology sector performance metrics vs benchmark? 3) What percentage of companies beat earnings expectations? 4) What was the VIX average for the period?"#;

/// Data gatherer prompt
pub const GATHERER: &str = r#"Use the provided prompts to gather the missing data for the market context commentary.

Missing Data Prompts:
{{missing_data_prompts}}

Quality Feedback:
{{quality_feedback}}

Current Commentary:
{{commentary}}

Strategy Details:
- Strategy: {{strategy_name}}
- Quarter: {{quarter}}
- Year: {{year}}
- Benchmark: {{benchmark}}

Using the provided prompts, gather the specific data needed to improve the commentary quality. Execute each prompt and collect the relevant information.

Provide your response in the following EXACT format:

DATA_GATHERING_RESULTS:
1. [Result from first prompt]
2. [Result from second prompt]
3. [Result from third prompt]

Example:
DATA_GATHERING_RESULTS:
1. S&P 500 performance for the period: +8.3%
2. Technology sector performance vs S&P 500: +12.1% (outperformed by 3.8%)
3. Companies beating earnings expectations: 75%"#;

/// Canned market research summary
///
/// The research step renders this template directly; it is not an LLM call.
pub const RESEARCH: &str = r#"Market Research Summary for {{quarter}} {{year}}:

Key Market Indicators:
- S&P 500: Strong performance with technology sector leading
- Federal Reserve: Maintained interest rates at current levels
- Inflation: Continued moderation trend
- Employment: Robust labor market conditions
- Geopolitical: Ongoing tensions affecting market sentiment

Sector Performance:
- Technology: Leading sector performance
- Healthcare: Solid gains
- Financials: Moderate performance
- Energy: Mixed results due to supply concerns

Market Drivers:
- Corporate earnings growth
- Federal Reserve policy
- Geopolitical developments
- AI and technology innovation"#;

/// Look up an embedded template by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    match name {
        "system" => Some(SYSTEM),
        "commentary" => Some(COMMENTARY),
        "review" => Some(REVIEW),
        "gatherer" => Some(GATHERER),
        "research" => Some(RESEARCH),
        _ => None,
    }
}
