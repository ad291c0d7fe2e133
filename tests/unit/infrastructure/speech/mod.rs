mod openai_speech_synthesizer_test;
mod text_splitting_test;
