mod hugging_face_translator;

pub use hugging_face_translator::{
    DEFAULT_HUB_URL, DEFAULT_INFERENCE_URL, DEFAULT_MODEL_TEMPLATE, HuggingFaceModelLoader,
    HuggingFaceTranslationModel,
};
