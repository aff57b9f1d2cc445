mod encoding_tests;
