mod redraw_tests;
