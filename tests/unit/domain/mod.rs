mod audio_name_test;
