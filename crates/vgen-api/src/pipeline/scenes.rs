//! Image prompts for a script's scenes.

/// Number of scenes rendered per video.
pub const SCENE_COUNT: usize = 4;

const PROMPT_POOL: [&str; SCENE_COUNT] = [
    "cinematic mysterious landscape with dramatic lighting, 8k quality, photorealistic",
    "stunning abstract visualization of discovery and knowledge, vibrant colors, ultra detailed",
    "epic cosmic scene with nebulas and stars, professional photography, awe-inspiring",
    "futuristic technology interface with glowing elements, sleek design, high contrast",
];

/// Up to `count` image prompts for `script`.
///
/// Prompts come from a fixed pool in order; the script text does not
/// influence the result yet.
pub fn scene_prompts(_script: &str, count: usize) -> Vec<String> {
    PROMPT_POOL
        .iter()
        .take(count)
        .map(|p| p.to_string())
        .collect()
}
