mod daybreak_tests;
